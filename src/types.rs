//! The transformed up/down rule table.

/// Up/down counting rule for a staircase.
///
/// The rule determines how many consecutive correct responses trigger a
/// decrease in intensity (making the task harder) and how many consecutive
/// incorrect responses trigger an increase (making it easier). The asymmetry
/// sets the accuracy level the procedure converges to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaircaseRule {
    /// 1-up, 1-down: converges at 50% correct.
    SimpleUpDown,
    /// 2-up, 1-down: converges at 70.7% correct.
    #[default]
    TwoUpOneDown,
    /// 3-up, 1-down: converges at 79.4% correct.
    ThreeUpOneDown,
    /// 1-up, 2-down: converges at 70.7% correct.
    OneUpTwoDown,
    /// 1-up, 3-down: converges at 79.4% correct.
    OneUpThreeDown,
}

impl StaircaseRule {
    /// Whether the intensity should increase (task get easier) given the
    /// current run of consecutive incorrect responses.
    pub fn should_increase(&self, consecutive_incorrect: u32) -> bool {
        match self {
            Self::SimpleUpDown => consecutive_incorrect >= 1,
            Self::TwoUpOneDown => consecutive_incorrect >= 1,
            Self::ThreeUpOneDown => consecutive_incorrect >= 1,
            Self::OneUpTwoDown => consecutive_incorrect >= 2,
            Self::OneUpThreeDown => consecutive_incorrect >= 3,
        }
    }

    /// Whether the intensity should decrease (task get harder) given the
    /// current run of consecutive correct responses.
    pub fn should_decrease(&self, consecutive_correct: u32) -> bool {
        match self {
            Self::SimpleUpDown => consecutive_correct >= 1,
            Self::TwoUpOneDown => consecutive_correct >= 2,
            Self::ThreeUpOneDown => consecutive_correct >= 3,
            Self::OneUpTwoDown => consecutive_correct >= 1,
            Self::OneUpThreeDown => consecutive_correct >= 1,
        }
    }

    /// Nominal accuracy level the staircase converges toward.
    pub fn target_accuracy(&self) -> f64 {
        match self {
            Self::SimpleUpDown => 0.5,
            Self::TwoUpOneDown | Self::OneUpTwoDown => 0.707,
            Self::ThreeUpOneDown | Self::OneUpThreeDown => 0.794,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_is_two_up_one_down() {
        assert_eq!(StaircaseRule::default(), StaircaseRule::TwoUpOneDown);
    }

    #[test]
    fn zero_run_never_triggers() {
        for rule in [
            StaircaseRule::SimpleUpDown,
            StaircaseRule::TwoUpOneDown,
            StaircaseRule::ThreeUpOneDown,
            StaircaseRule::OneUpTwoDown,
            StaircaseRule::OneUpThreeDown,
        ] {
            assert!(!rule.should_increase(0));
            assert!(!rule.should_decrease(0));
        }
    }

    #[test]
    fn target_accuracies() {
        assert_eq!(StaircaseRule::SimpleUpDown.target_accuracy(), 0.5);
        assert_eq!(StaircaseRule::TwoUpOneDown.target_accuracy(), 0.707);
        assert_eq!(StaircaseRule::OneUpTwoDown.target_accuracy(), 0.707);
        assert_eq!(StaircaseRule::ThreeUpOneDown.target_accuracy(), 0.794);
        assert_eq!(StaircaseRule::OneUpThreeDown.target_accuracy(), 0.794);
    }
}
