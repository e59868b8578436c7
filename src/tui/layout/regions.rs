// Region tree - declarative geometry for the panel layout
//
// Core concepts:
// - Region: a node with a size rule and an optional panel name
// - Direction: how a region splits its area among its children
// - arrange(): prune hidden regions, then partition the terminal
//
// Arranging is a pure function of (area, tree, visibility). Nothing is
// cached between calls, so a resize race heals on the next refresh.

use ratatui::layout::Rect;

/// Direction for laying out children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Children stacked top to bottom
    #[default]
    Vertical,
    /// Children side by side, left to right
    Horizontal,
}

/// Size rule for a region along its parent's direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeConstraint {
    /// Fixed number of rows/columns (cropped to what is left)
    Fixed(u16),
    /// Proportional share of the space left after fixed regions
    Weight(u16),
}

/// A node in the layout tree
#[derive(Debug, Clone)]
pub struct Region {
    /// Panel that receives this region's rectangle
    pub name: Option<String>,
    pub direction: LayoutDirection,
    pub size: SizeConstraint,
    /// Weighted regions below this size are promoted to it when room allows
    pub min_size: u16,
    pub children: Vec<Region>,
}

impl Region {
    /// Leaf region bound to a panel
    pub fn panel(name: impl Into<String>, size: SizeConstraint) -> Self {
        Self {
            name: Some(name.into()),
            direction: LayoutDirection::Vertical,
            size,
            min_size: 0,
            children: Vec::new(),
        }
    }

    pub fn vertical(children: Vec<Region>) -> Self {
        Self {
            name: None,
            direction: LayoutDirection::Vertical,
            size: SizeConstraint::Weight(1),
            min_size: 0,
            children,
        }
    }

    pub fn horizontal(children: Vec<Region>) -> Self {
        Self {
            direction: LayoutDirection::Horizontal,
            ..Self::vertical(children)
        }
    }

    /// Bind a container to a panel (composite panels such as the status bar)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: SizeConstraint) -> Self {
        self.size = size;
        self
    }

    pub fn with_min(mut self, min_size: u16) -> Self {
        self.min_size = min_size;
        self
    }

    /// Every panel name referenced anywhere in the tree, in pre-order
    pub fn panel_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(name) = &self.name {
            out.push(name);
        }
        for child in &self.children {
            child.collect_names(out);
        }
    }
}

/// Partition `area` among the visible regions of `root`.
///
/// Returns `(panel name, rect)` pairs in pre-order, so a composite panel
/// comes before its sub-panels. Hidden regions are removed before space is
/// distributed; their siblings absorb the space.
pub fn arrange(root: &Region, area: Rect, is_visible: impl Fn(&str) -> bool) -> Vec<(String, Rect)> {
    let mut out = Vec::new();
    if let Some(pruned) = prune(root, &is_visible) {
        place(&pruned, area, &mut out);
    }
    out
}

fn prune(region: &Region, is_visible: &dyn Fn(&str) -> bool) -> Option<Region> {
    if let Some(name) = &region.name {
        if !is_visible(name) {
            return None;
        }
    }

    let children: Vec<Region> = region
        .children
        .iter()
        .filter_map(|c| prune(c, is_visible))
        .collect();

    // Anonymous regions only exist to hold children
    if children.is_empty() && region.name.is_none() {
        return None;
    }

    Some(Region {
        name: region.name.clone(),
        direction: region.direction,
        size: region.size,
        min_size: region.min_size,
        children,
    })
}

fn place(region: &Region, area: Rect, out: &mut Vec<(String, Rect)>) {
    if let Some(name) = &region.name {
        out.push((name.clone(), area));
    }
    if region.children.is_empty() {
        return;
    }

    let extent = match region.direction {
        LayoutDirection::Vertical => area.height,
        LayoutDirection::Horizontal => area.width,
    };
    let sizes = distribute(&region.children, extent);

    let mut offset = 0u16;
    for (child, size) in region.children.iter().zip(sizes) {
        let rect = match region.direction {
            LayoutDirection::Vertical => Rect::new(area.x, area.y + offset, area.width, size),
            LayoutDirection::Horizontal => Rect::new(area.x + offset, area.y, size, area.height),
        };
        offset += size;
        place(child, rect, out);
    }
}

/// Split `total` cells among `children`; the result always sums to `total`
fn distribute(children: &[Region], total: u16) -> Vec<u16> {
    let n = children.len();
    let mut sizes = vec![0u16; n];
    let mut settled = vec![false; n];
    let mut remaining = total;

    for (i, child) in children.iter().enumerate() {
        if let SizeConstraint::Fixed(size) = child.size {
            sizes[i] = size.min(remaining);
            remaining -= sizes[i];
            settled[i] = true;
        }
    }

    loop {
        let weighted: Vec<usize> = (0..n).filter(|&i| !settled[i]).collect();
        let Some(&last) = weighted.last() else {
            break;
        };
        let total_weight: u32 = weighted.iter().map(|&i| weight_of(&children[i])).sum();
        let share = |i: usize| -> u16 {
            if total_weight == 0 {
                0
            } else {
                (remaining as u32 * weight_of(&children[i]) / total_weight) as u16
            }
        };

        let under_min = weighted.iter().copied().find(|&i| {
            let min = children[i].min_size;
            share(i) < min && min <= remaining
        });

        match under_min {
            Some(i) => {
                sizes[i] = children[i].min_size;
                remaining -= sizes[i];
                settled[i] = true;
            }
            None => {
                let mut used = 0u16;
                for &i in &weighted {
                    sizes[i] = share(i);
                    used += sizes[i];
                }
                sizes[last] += remaining - used;
                remaining = 0;
                break;
            }
        }
    }

    // Only fixed regions left and they did not fill the extent
    if remaining > 0 {
        if let Some(size) = sizes.last_mut() {
            *size += remaining;
        }
    }

    sizes
}

fn weight_of(region: &Region) -> u32 {
    match region.size {
        SizeConstraint::Weight(w) => w as u32,
        SizeConstraint::Fixed(_) => 0,
    }
}
