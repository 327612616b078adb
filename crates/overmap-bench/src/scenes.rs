use overmap_core::scale::Scale;
use overmap_core::types::{Marker, WorldId};

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub marker_count: u32,
    pub scale: Scale,
    pub show_player_names: bool,
    pub show_y_level: bool,
}

/// Return the standard suite of benchmark scenes (8 to 256 markers).
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "sparse-8",
            marker_count: 8,
            scale: Scale::Closest,
            show_player_names: false,
            show_y_level: false,
        },
        SceneConfig {
            name: "town-32",
            marker_count: 32,
            scale: Scale::Closest,
            show_player_names: true,
            show_y_level: false,
        },
        SceneConfig {
            name: "labels-64",
            marker_count: 64,
            scale: Scale::Normal,
            show_player_names: true,
            show_y_level: true,
        },
        SceneConfig {
            name: "crowd-128",
            marker_count: 128,
            scale: Scale::Close,
            show_player_names: true,
            show_y_level: false,
        },
        SceneConfig {
            name: "wide-256",
            marker_count: 256,
            scale: Scale::Farthest,
            show_player_names: false,
            show_y_level: false,
        },
    ]
}

/// Generate the marker population for one frame of a scene.
///
/// Positions mix the marker index and frame number with fixed multipliers,
/// so runs are reproducible without an RNG dependency. The spread is a
/// little wider than one tile footprint, leaving roughly a fifth of the
/// markers off-canvas to exercise culling. Every 13th marker is invisible.
pub fn generate_markers(config: &SceneConfig, world: &WorldId, frame: u32) -> Vec<Marker> {
    let coverage = config.scale.coverage();
    let spread = coverage + coverage / 4;

    (0..config.marker_count)
        .map(|i| {
            let mix_x = (i as i64).wrapping_mul(7919) ^ (frame as i64).wrapping_mul(31337);
            let mix_z = (i as i64).wrapping_mul(104_729) ^ (frame as i64).wrapping_mul(1299);
            Marker {
                world: world.clone(),
                x: mix_x.rem_euclid(spread) - coverage / 8,
                y: 40 + mix_x.rem_euclid(100),
                z: mix_z.rem_euclid(spread) - coverage / 8,
                yaw: ((i * 37 + frame * 11) % 360) as f32,
                identity: format!("marker-{i:04}"),
                label: format!("Player{i:02}"),
                visible: i % 13 != 12,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_deterministic() {
        let config = &standard_scenes()[1];
        let world = WorldId::new("bench");
        let a = generate_markers(config, &world, 7);
        let b = generate_markers(config, &world, 7);
        assert_eq!(a.len(), b.len());
        for (ma, mb) in a.iter().zip(&b) {
            assert_eq!(ma.x, mb.x);
            assert_eq!(ma.z, mb.z);
            assert_eq!(ma.identity, mb.identity);
        }
    }

    #[test]
    fn test_markers_move_between_frames() {
        let config = &standard_scenes()[1];
        let world = WorldId::new("bench");
        let a = generate_markers(config, &world, 0);
        let b = generate_markers(config, &world, 1);
        assert!(a.iter().zip(&b).any(|(ma, mb)| ma.x != mb.x || ma.z != mb.z));
    }

    #[test]
    fn test_positions_inside_spread() {
        for config in standard_scenes() {
            let coverage = config.scale.coverage();
            let world = WorldId::new("bench");
            for marker in generate_markers(&config, &world, 3) {
                assert!(marker.x >= -coverage / 8);
                assert!(marker.x < coverage + coverage / 8);
            }
        }
    }
}
