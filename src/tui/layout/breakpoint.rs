//! Width breakpoints for components that adapt their content to the space
//! they were given (the status segments trim fields on narrow terminals).

/// Ordered narrowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 24 cols: only the essentials fit
    Compact,
    /// 24-35 cols
    Normal,
    /// 36-59 cols
    Wide,
    /// 60+ cols
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=23 => Breakpoint::Compact,
            24..=35 => Breakpoint::Normal,
            36..=59 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    pub fn at_least(self, min: Breakpoint) -> bool {
        self >= min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(0), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(23), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(24), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(35), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(36), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::UltraWide);
    }

    #[test]
    fn at_least_comparisons() {
        let wide = Breakpoint::Wide;
        assert!(wide.at_least(Breakpoint::Compact));
        assert!(wide.at_least(Breakpoint::Normal));
        assert!(wide.at_least(Breakpoint::Wide));
        assert!(!wide.at_least(Breakpoint::UltraWide));
    }
}
