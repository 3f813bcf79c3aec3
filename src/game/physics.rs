//! Kinematic player physics against static platform geometry
//!
//! One tick is a pure function of (player, platform list, config): identical
//! inputs produce bit-identical output states, which replay and the
//! simulation tests rely on.

use crate::config::{GameConfig, Platform};

use super::room::PlayerState;

/// Deterministic per-player, per-tick state transition
pub struct PhysicsEngine;

impl PhysicsEngine {
    /// Advance one player by one fixed step.
    ///
    /// Order is load-bearing for game feel and must not be rearranged:
    /// horizontal velocity from inputs, gravity unconditionally (zeroed only
    /// by resolution), integration, platform resolution in list order, then
    /// the world-bounds clamp.
    pub fn step(player: &mut PlayerState, platforms: &[Platform], config: &GameConfig) {
        // Horizontal movement; left wins when both flags are set
        if player.inputs.left {
            player.vx = -config.move_speed;
        } else if player.inputs.right {
            player.vx = config.move_speed;
        } else {
            player.vx = 0.0;
        }

        // Gravity applies every tick, grounded or not
        player.vy += config.gravity;

        // Integrate position (single-step semi-implicit Euler)
        player.x += player.vx;
        player.y += player.vy;

        // Contact state is re-derived from scratch each tick
        player.grounded = false;

        // Every platform is evaluated in list order, with no early exit, so
        // overlapping platforms produce cascading corrections
        for platform in platforms {
            if Self::overlaps(player, platform) {
                Self::resolve(player, platform, config);
            }
        }

        // World bounds, applied after all platform resolution
        if player.x < 0.0 {
            player.x = 0.0;
        }
        if player.x + player.width > config.map_width {
            player.x = config.map_width - player.width;
        }
        if player.y > config.map_height {
            player.y = config.map_height - player.height;
            player.vy = 0.0;
        }

        debug_assert!(player.x >= 0.0 && player.x + player.width <= config.map_width);
    }

    /// AABB intersection test between a player and a platform
    pub fn overlaps(player: &PlayerState, platform: &Platform) -> bool {
        player.x < platform.x + platform.width
            && player.x + player.width > platform.x
            && player.y < platform.y + platform.height
            && player.y + player.height > platform.y
    }

    /// Push the player out of one overlapping platform along the axis of
    /// minimum penetration. Tie-break order when magnitudes are equal:
    /// top > bottom > left > right. Top resolution only applies while
    /// falling, bottom only while rising.
    fn resolve(player: &mut PlayerState, platform: &Platform, config: &GameConfig) {
        let overlap_left = (player.x + player.width) - platform.x;
        let overlap_right = (platform.x + platform.width) - player.x;
        let overlap_top = (player.y + player.height) - platform.y;
        let overlap_bottom = (platform.y + platform.height) - player.y;

        let min_overlap = overlap_left
            .min(overlap_right)
            .min(overlap_top)
            .min(overlap_bottom);

        if min_overlap == overlap_top && player.vy > 0.0 {
            // Landing on the platform from above
            player.y = platform.y - player.height;
            player.vy = 0.0;
            player.grounded = true;

            // A held jump is consumed exactly at the tick ground contact
            // resolves, never while airborne
            if player.inputs.jump {
                player.vy = config.jump_strength;
                player.grounded = false;
            }
        } else if min_overlap == overlap_bottom && player.vy < 0.0 {
            // Bumping the underside while rising
            player.y = platform.y + platform.height;
            player.vy = 0.0;
        } else if min_overlap == overlap_left {
            player.x = platform.x - player.width;
        } else if min_overlap == overlap_right {
            player.x = platform.x + platform.width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::InputFlags;
    use uuid::Uuid;

    fn test_player(x: f32, y: f32) -> PlayerState {
        PlayerState::new(Uuid::new_v4(), "tester".to_string(), x, y, 32.0)
    }

    fn ground(config: &GameConfig) -> &Platform {
        &config.platforms[0]
    }

    #[test]
    fn step_is_deterministic() {
        let config = GameConfig::default();
        let mut a = test_player(412.3, 633.7);
        a.vx = 5.0;
        a.vy = 3.2;
        a.inputs = InputFlags::new(false, true, true);
        let mut b = a.clone();

        PhysicsEngine::step(&mut a, &config.platforms, &config);
        PhysicsEngine::step(&mut b, &config.platforms, &config);

        assert_eq!(a, b);
    }

    #[test]
    fn left_input_wins_over_right() {
        let config = GameConfig::default();
        let mut player = test_player(400.0, 300.0);
        player.inputs = InputFlags::new(true, true, false);

        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.vx, -config.move_speed);
    }

    #[test]
    fn no_input_zeroes_horizontal_velocity() {
        let config = GameConfig::default();
        let mut player = test_player(400.0, 300.0);
        player.vx = 5.0;

        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn gravity_accumulates_while_airborne() {
        let config = GameConfig::default();
        let mut player = test_player(400.0, 100.0);

        PhysicsEngine::step(&mut player, &config.platforms, &config);
        assert_eq!(player.vy, config.gravity);

        PhysicsEngine::step(&mut player, &config.platforms, &config);
        assert_eq!(player.vy, config.gravity * 2.0);
    }

    #[test]
    fn falling_player_settles_on_ground() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 700.0);

        for _ in 0..120 {
            PhysicsEngine::step(&mut player, &config.platforms, &config);
        }

        let expected_y = ground(&config).y - player.height;
        assert_eq!(player.y, expected_y); // 850 - 32 = 818
        assert_eq!(player.vy, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn grounded_player_stays_put_under_repeated_ticks() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 700.0);
        for _ in 0..120 {
            PhysicsEngine::step(&mut player, &config.platforms, &config);
        }
        let settled = player.clone();

        for _ in 0..60 {
            PhysicsEngine::step(&mut player, &config.platforms, &config);
        }
        assert_eq!(player, settled);
    }

    #[test]
    fn jump_consumed_on_ground_contact() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 700.0);
        for _ in 0..120 {
            PhysicsEngine::step(&mut player, &config.platforms, &config);
        }
        assert!(player.grounded);

        player.inputs.jump = true;
        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.vy, config.jump_strength);
        assert!(!player.grounded);
    }

    #[test]
    fn jump_held_airborne_is_not_consumed_until_landing() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 400.0);
        player.inputs.jump = true;

        // Falling with jump held: no mid-air jump
        PhysicsEngine::step(&mut player, &config.platforms, &config);
        assert_eq!(player.vy, config.gravity);

        // Keep falling until ground contact; the held jump fires exactly then
        for _ in 0..120 {
            PhysicsEngine::step(&mut player, &config.platforms, &config);
            if player.vy == config.jump_strength {
                return;
            }
        }
        panic!("held jump was never consumed at landing");
    }

    #[test]
    fn rising_player_bumps_platform_underside() {
        let config = GameConfig::default();
        // Platform at (400, 650, 300, 20); start just below it, moving up
        let mut player = test_player(500.0, 680.0);
        player.vy = -12.0;

        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.y, 650.0 + 20.0);
        assert_eq!(player.vy, 0.0);
        assert!(!player.grounded);
    }

    #[test]
    fn horizontal_overlap_pushes_out_sideways() {
        let config = GameConfig::default();
        // Deep vertical overlap with platform (400, 650, 300, 20) while the
        // horizontal penetration is shallow: resolved along x
        let mut player = test_player(375.0, 645.0);
        player.inputs.right = true;

        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.x, 400.0 - player.width);
    }

    #[test]
    fn world_bounds_clamp_x() {
        let config = GameConfig::default();
        let mut player = test_player(2.0, 300.0);
        player.inputs.left = true;

        PhysicsEngine::step(&mut player, &config.platforms, &config);
        assert_eq!(player.x, 0.0);

        player.inputs = InputFlags::new(false, true, false);
        player.x = config.map_width - player.width - 2.0;
        PhysicsEngine::step(&mut player, &config.platforms, &config);
        assert_eq!(player.x, config.map_width - player.width);
    }

    #[test]
    fn falling_below_world_snaps_to_floor() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 300.0);
        player.y = config.map_height + 50.0;
        player.vy = 30.0;

        PhysicsEngine::step(&mut player, &config.platforms, &config);

        assert_eq!(player.y, config.map_height - player.height);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn position_invariants_hold_under_sustained_input() {
        let config = GameConfig::default();
        let mut player = test_player(100.0, 700.0);
        player.inputs = InputFlags::new(true, false, true);

        for tick in 0..600 {
            if tick == 200 {
                player.inputs = InputFlags::new(false, true, true);
            }
            PhysicsEngine::step(&mut player, &config.platforms, &config);

            assert!(player.x >= 0.0);
            assert!(player.x <= config.map_width - player.width);
            assert!(player.y <= config.map_height - player.height);
        }
    }
}
