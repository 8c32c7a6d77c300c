use crate::calculator::types::{Category, CategoryKind, Sgpa};

/// Minimum SGPA for each tier, highest first. Anything below the last
/// entry is [`POOR`].
///
/// Two tiers share the `good` class and two share `average`; they differ
/// only in badge and message.
static TIERS: &[(f64, Category)] = &[
    (
        9.0,
        Category {
            kind: CategoryKind::Excellent,
            badge: "Outstanding! 🏆",
            message: "Exceptional performance! Keep it up!",
        },
    ),
    (
        8.0,
        Category {
            kind: CategoryKind::Good,
            badge: "Excellent! ⭐",
            message: "Great job! You're doing amazing!",
        },
    ),
    (
        7.0,
        Category {
            kind: CategoryKind::Good,
            badge: "Very Good 👍",
            message: "Well done! Keep pushing forward!",
        },
    ),
    (
        6.0,
        Category {
            kind: CategoryKind::Average,
            badge: "Good 📚",
            message: "Good effort! Aim higher next time!",
        },
    ),
    (
        5.0,
        Category {
            kind: CategoryKind::Average,
            badge: "Average 📖",
            message: "You passed! Work on improving.",
        },
    ),
];

static POOR: Category = Category {
    kind: CategoryKind::Poor,
    badge: "Needs Improvement 💪",
    message: "Don't give up! You can do better!",
};

/// Maps an SGPA to its performance tier. NaN falls through to `poor`.
pub fn classify(sgpa: f64) -> Category {
    TIERS
        .iter()
        .find(|(min, _)| sgpa >= *min)
        .map(|(_, category)| *category)
        .unwrap_or(POOR)
}

impl Sgpa {
    /// Tier of the rounded value, i.e. the value the user sees.
    pub fn category(self) -> Category {
        classify(self.value())
    }
}
