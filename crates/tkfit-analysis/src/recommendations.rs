//! Role-specific training recommendations

use serde::Serialize;
use tkfit_core::PlayerRole;

/// A titled list of advice items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceBlock {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// Training plan shown for the selected role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub role: PlayerRole,
    pub physical: AdviceBlock,
    /// Recovery for a Post, technical development for a Guard
    pub secondary: AdviceBlock,
    /// Recommended training intensity in [0, 1]
    pub training_intensity: f32,
}

impl Recommendation {
    pub fn for_role(role: PlayerRole) -> Self {
        match role {
            PlayerRole::Post => Recommendation {
                role,
                physical: AdviceBlock {
                    title: "Physical training",
                    items: &[
                        "Repeated short sprints (5x10m)",
                        "Power work in the paint",
                        "Lower-body strengthening",
                        "Vertical jump drills",
                    ],
                },
                secondary: AdviceBlock {
                    title: "Recovery",
                    items: &[
                        "Post-match cryotherapy",
                        "30g protein within 30 min",
                        "Targeted quadriceps stretching",
                        "Deep tissue massage",
                    ],
                },
                training_intensity: 0.65,
            },
            PlayerRole::Guard => Recommendation {
                role,
                physical: AdviceBlock {
                    title: "Physical training",
                    items: &[
                        "High-intensity endurance",
                        "Repeated changes of pace",
                        "Resisted dribbling",
                        "Coordination drills",
                    ],
                },
                secondary: AdviceBlock {
                    title: "Technical development",
                    items: &[
                        "Fast decision making",
                        "Accurate passing under fatigue",
                        "Shooting on the move",
                        "Reading the game",
                    ],
                },
                training_intensity: 0.85,
            },
        }
    }

    pub fn intensity_label(&self) -> String {
        format!(
            "Recommended training intensity: {:.0}%",
            self.training_intensity * 100.0
        )
    }
}

/// How each role's match profile differs, shown beside the player comparison
pub fn performance_differences(role: PlayerRole) -> AdviceBlock {
    match role {
        PlayerRole::Post => AdviceBlock {
            title: "Post",
            items: &[
                "Higher muscle activity in the paint",
                "Needs recovery periods",
                "Covers less distance but with high local intensity",
            ],
        },
        PlayerRole::Guard => AdviceBlock {
            title: "Guard",
            items: &[
                "Higher average speed",
                "Greater cardiovascular endurance",
                "Wider court coverage",
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_specific_plans() {
        let post = Recommendation::for_role(PlayerRole::Post);
        let guard = Recommendation::for_role(PlayerRole::Guard);

        assert_eq!(post.secondary.title, "Recovery");
        assert_eq!(guard.secondary.title, "Technical development");
        assert!(guard.training_intensity > post.training_intensity);
        assert_eq!(post.intensity_label(), "Recommended training intensity: 65%");
        assert_eq!(guard.physical.items.len(), 4);
    }

    #[test]
    fn test_performance_differences_per_role() {
        let notes: Vec<AdviceBlock> = PlayerRole::ALL
            .iter()
            .map(|&role| performance_differences(role))
            .collect();

        assert_eq!(notes[0].title, "Post");
        assert_eq!(notes[1].title, "Guard");
        assert!(notes.iter().all(|block| block.items.len() == 3));
        assert!(notes[0].items[1].contains("recovery"));
        assert!(notes[1].items[0].contains("speed"));
    }
}
