// Default region tree
//
//   ┌───────────────────────────┬──────────────┐
//   │ messages                  │ debug |      │
//   │                           │ text-viewer  │
//   ├───────────────────────────┴──────────────┤
//   │ input                                    │
//   ├──────────────┬────────────┬──────────────┤
//   │ status-left  │ status-ctr │ status-right │
//   └──────────────┴────────────┴──────────────┘
//
// Both right-hand panels sit in the same column; visibility decides which
// one (if any) takes part in the partition.

use super::regions::{Region, SizeConstraint};
use super::{
    PANEL_DEBUG, PANEL_INPUT, PANEL_MESSAGES, PANEL_STATUS, PANEL_TEXT_VIEWER, STATUS_CENTER,
    STATUS_LEFT, STATUS_RIGHT,
};
use crate::config::LayoutConfig;

/// Build the standard shell layout for the given zoom state
pub fn default_tree(config: &LayoutConfig, zoomed: bool) -> Region {
    let (messages_weight, side_weight) = if zoomed {
        (config.zoomed_messages_weight, config.zoomed_side_weight)
    } else {
        (config.messages_weight, config.side_weight)
    };

    let center = Region::horizontal(vec![
        Region::panel(PANEL_MESSAGES, SizeConstraint::Weight(messages_weight))
            .with_min(config.min_panel_width),
        Region::panel(PANEL_DEBUG, SizeConstraint::Weight(side_weight))
            .with_min(config.min_panel_width),
        Region::panel(PANEL_TEXT_VIEWER, SizeConstraint::Weight(side_weight))
            .with_min(config.min_panel_width),
    ])
    .with_min(config.min_panel_height);

    let status = Region::horizontal(vec![
        Region::panel(STATUS_LEFT, SizeConstraint::Weight(2)),
        Region::panel(STATUS_CENTER, SizeConstraint::Weight(1)),
        Region::panel(STATUS_RIGHT, SizeConstraint::Fixed(config.status_right_width)),
    ])
    .named(PANEL_STATUS)
    .with_size(SizeConstraint::Fixed(config.status_height));

    Region::vertical(vec![
        center,
        Region::panel(PANEL_INPUT, SizeConstraint::Fixed(config.input_height)),
        status,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::layout::regions::arrange;
    use ratatui::layout::Rect;

    fn width_of(placed: &[(String, Rect)], name: &str) -> u16 {
        placed
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.width)
            .unwrap_or(0)
    }

    #[test]
    fn names_every_shell_panel() {
        let tree = default_tree(&LayoutConfig::default(), false);
        assert_eq!(
            tree.panel_names(),
            vec![
                "messages",
                "debug",
                "text-viewer",
                "input",
                "status",
                "status-left",
                "status-center",
                "status-right"
            ]
        );
    }

    #[test]
    fn messages_take_full_width_without_right_panel() {
        let tree = default_tree(&LayoutConfig::default(), false);
        let placed = arrange(&tree, Rect::new(0, 0, 120, 30), |n| {
            n != PANEL_DEBUG && n != PANEL_TEXT_VIEWER
        });
        assert_eq!(width_of(&placed, PANEL_MESSAGES), 120);
        assert_eq!(width_of(&placed, STATUS_RIGHT), 36);
    }

    #[test]
    fn zoom_shifts_weight_to_right_panel() {
        let config = LayoutConfig::default();
        let visible = |n: &str| n != PANEL_TEXT_VIEWER;
        let area = Rect::new(0, 0, 120, 30);

        let normal = arrange(&default_tree(&config, false), area, visible);
        assert_eq!(width_of(&normal, PANEL_MESSAGES), 80);
        assert_eq!(width_of(&normal, PANEL_DEBUG), 40);

        let zoomed = arrange(&default_tree(&config, true), area, visible);
        assert_eq!(width_of(&zoomed, PANEL_MESSAGES), 24);
        assert_eq!(width_of(&zoomed, PANEL_DEBUG), 96);
    }

    #[test]
    fn narrow_side_panel_is_promoted_to_min_width() {
        let config = LayoutConfig::default();
        let placed = arrange(&default_tree(&config, false), Rect::new(0, 0, 50, 20), |n| {
            n != PANEL_TEXT_VIEWER
        });
        assert_eq!(width_of(&placed, PANEL_DEBUG), config.min_panel_width);
        assert_eq!(width_of(&placed, PANEL_MESSAGES), 30);
    }
}
