#[cfg(test)]
mod tests {
    use crate::commands::SimCommand;
    use crate::components::{EntityId, Pathogen};
    use crate::config::{SimConfig, VirusTable};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::state::{EntityView, SimSnapshot};
    use crate::types::{Position, SimTime, Velocity, WorldBounds};

    #[test]
    fn test_virus_kind_serde() {
        for v in VirusKind::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: VirusKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_command_tagged_json() {
        let cmd = SimCommand::Reset {
            width: 200.0,
            height: 100.0,
            population: 10,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"Reset\""));
        let back: SimCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);

        let parsed: SimCommand =
            serde_json::from_str(r#"{"type":"SelectVirus","kind":"Beta"}"#).unwrap();
        assert_eq!(parsed, SimCommand::SelectVirus { kind: VirusKind::Beta });
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = SimSnapshot {
            time: SimTime { tick: 3 },
            bounds: WorldBounds::centered(200.0, 100.0),
            active_virus: VirusKind::Alpha,
            population: 1,
            infected_count: 1,
            entities: vec![EntityView {
                id: EntityId(0),
                position: Position::new(1.0, -2.0),
                radius: DEFAULT_RADIUS,
                infected: true,
                pathogen_tag: Some(ALPHA_TAG.into()),
                colour: ALPHA_TAG.into(),
            }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SimSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = SimConfig::default();
        assert_eq!(config.world_width, 700.0);
        assert_eq!(config.world_height, 500.0);
        assert_eq!(config.population, 200);
        assert_eq!(config.cell_divisions, 14);
        assert_eq!(config.speed(), 3.5);
        assert_eq!(config.active_profile().tag, "red");
        assert_eq!(config.active_profile().duration, 100);
        assert_eq!(config.viruses.profile(VirusKind::Beta).duration, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_invalid_fields() {
        let cases = [
            (
                SimConfig { world_width: 0.0, ..Default::default() },
                "width",
            ),
            (
                SimConfig { world_height: f64::NAN, ..Default::default() },
                "height",
            ),
            (SimConfig { population: 0, ..Default::default() }, "population"),
            (SimConfig { radius: -1.0, ..Default::default() }, "radius"),
            (
                SimConfig { world_width: 10.0, ..Default::default() },
                "no room",
            ),
            (
                SimConfig { cell_divisions: 0, ..Default::default() },
                "cell_divisions",
            ),
        ];
        for (config, needle) in cases {
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains(needle),
                "expected '{needle}' in '{err}'"
            );
        }
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        let config =
            SimConfig::from_json_str(r#"{"population": 12, "active_virus": "Beta"}"#).unwrap();
        assert_eq!(config.population, 12);
        assert_eq!(config.active_virus, VirusKind::Beta);
        assert_eq!(config.viruses, VirusTable::default());
        assert_eq!(config.world_width, DEFAULT_WORLD_WIDTH);
    }

    #[test]
    fn test_json_config_is_validated() {
        let err = SimConfig::from_json_str(r#"{"population": 0}"#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPopulation);

        let err = SimConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_pathogen_copies_profile() {
        let table = VirusTable::default();
        let p = Pathogen::new(VirusKind::Beta, table.profile(VirusKind::Beta));
        assert_eq!(p.tag, BETA_TAG);
        assert_eq!(p.ticks_remaining, BETA_DURATION);
    }

    #[test]
    fn test_geometry_helpers() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_squared(&b), 25.0);
        assert_eq!(b.distance_squared(&a), 25.0);
        assert_eq!(Velocity::new(3.0, 4.0).speed(), 5.0);
        assert!(Velocity::ZERO.is_zero());

        let bounds = WorldBounds::centered(200.0, 100.0);
        assert_eq!(bounds.width(), 200.0);
        assert_eq!(bounds.height(), 100.0);
        assert!(bounds.contains(&Position::new(-100.0, 50.0)));
        assert!(!bounds.contains(&Position::new(0.0, 51.0)));
    }

    #[test]
    fn test_sim_time_and_run_state() {
        let mut time = SimTime::default();
        time.advance();
        time.advance();
        assert_eq!(time.tick, 2);

        assert_eq!(RunState::default(), RunState::Stopped);
        assert_eq!(RunState::Stopped.toggled(), RunState::Running);
        assert_eq!(RunState::Running.toggled(), RunState::Stopped);
    }
}
