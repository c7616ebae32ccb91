#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::components::DefenseBase;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::AudioEvent;
    use crate::profiles::{explosion_radius, projectile_profile, Terminal};
    use crate::state::GameStateSnapshot;
    use crate::types::{Arena, Position, SimTime, Velocity};

    fn base() -> DefenseBase {
        DefenseBase {
            id: 0,
            x: 50.0,
            y: 770.0,
            hits: 0,
            cooldown_ms: 0.0,
            mg_ammo: MG_MAX_AMMO,
            mg_overheated: false,
            mg_last_shot_ms: None,
            cannon_last_shot_ms: None,
            laser_last_shot_ms: None,
        }
    }

    #[test]
    fn test_command_wire_shape() {
        let json = serde_json::to_string(&PlayerCommand::SelectWeapon {
            weapon: WeaponKind::Cannon,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"SelectWeapon","weapon":"Cannon"}"#);

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"FireAt","x":10.0,"y":20.5}"#).unwrap();
        assert_eq!(parsed, PlayerCommand::FireAt { x: 10.0, y: 20.5 });
    }

    #[test]
    fn test_audio_event_wire_shape() {
        let json = serde_json::to_string(&AudioEvent::WeaponFired {
            weapon: WeaponKind::Laser,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"WeaponFired","weapon":"Laser"}"#);
    }

    #[test]
    fn test_weapon_slots() {
        assert_eq!(WeaponKind::from_slot(1), Some(WeaponKind::Standard));
        assert_eq!(WeaponKind::from_slot(8), Some(WeaponKind::GuidedBarrage));
        assert_eq!(WeaponKind::from_slot(0), None);
        assert_eq!(WeaponKind::from_slot(9), None);
        for weapon in WeaponKind::ALL {
            assert_eq!(WeaponKind::from_slot(weapon.slot()), Some(weapon));
        }
    }

    #[test]
    fn test_profile_table_consistency() {
        for weapon in WeaponKind::ALL {
            let Some(profile) = projectile_profile(weapon) else {
                assert!(matches!(weapon, WeaponKind::Laser | WeaponKind::Drone));
                continue;
            };
            assert_eq!(
                profile.is_self_guided(),
                matches!(weapon, WeaponKind::Homing | WeaponKind::GuidedBarrage)
            );
            // Every self-guided variant has a flight-time safety valve.
            assert_eq!(profile.is_self_guided(), profile.max_flight_ms.is_some());
            assert!(profile.speed > 0.0);
        }
        let cannon = projectile_profile(WeaponKind::Cannon).unwrap();
        assert_eq!(
            cannon.terminal,
            Terminal::Contact {
                hit_radius: CANNON_HIT_RADIUS
            }
        );
        let standard = projectile_profile(WeaponKind::Standard).unwrap();
        assert!(matches!(standard.terminal, Terminal::DetonateAtAim(_)));
    }

    #[test]
    fn test_explosion_radii() {
        let arena = Arena::new(1000.0, 700.0);
        assert_eq!(explosion_radius(ExplosionKind::Intercept, &arena), 70.0);
        assert_eq!(explosion_radius(ExplosionKind::GroundImpact, &arena), 80.0);
        assert!((explosion_radius(ExplosionKind::StandardArrival, &arena) - 84.0).abs() < 1e-9);
        assert_eq!(explosion_radius(ExplosionKind::Nuclear, &arena), 400.0);
        assert!((explosion_radius(ExplosionKind::DroneBlast, &arena) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_activity_invariant() {
        let mut b = base();
        assert!(b.is_active());

        b.hits = 2;
        b.cooldown_ms = 1500.0;
        assert!(!b.is_active());
        assert!(!b.is_destroyed());

        b.cooldown_ms = 0.0;
        assert!(b.is_active());

        b.hits = BASE_MAX_HITS;
        assert!(b.is_destroyed());
        assert!(!b.is_active());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.tick, 2);
        assert!((t.now_ms() - 750.0).abs() < 1e-9);
    }

    #[test]
    fn test_kinematics_helpers() {
        let v = Velocity::from_heading(std::f64::consts::FRAC_PI_2, 3.0);
        assert!(v.0.x.abs() < 1e-9);
        assert!((v.0.y - 3.0).abs() < 1e-9);
        assert!((v.speed() - 3.0).abs() < 1e-9);

        let mut p = Position::new(10.0, 10.0);
        p.advance(&v, 2.0);
        assert!((p.y() - 16.0).abs() < 1e-9);
        assert!((Position::new(0.0, 0.0).distance_to(&Position::new(3.0, 4.0)) - 5.0).abs() < 1e-9);

        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.ground_y(), 580.0);
        assert!(arena.contains(&Position::new(400.0, 300.0)));
        assert!(!arena.contains(&Position::new(-1.0, 300.0)));
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Running);
        assert_eq!(back.armed_weapon, WeaponKind::Standard);
        assert!(back.enemies.is_empty());
    }
}
