use serde::Serialize;

use crate::dom::DomNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingTitle {
    pub text: String,
    /// Characters.
    pub length: usize,
    pub words: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingLevelStats {
    pub level: u8,
    pub count: usize,
    pub titles: Vec<HeadingTitle>,
    pub total_length: usize,
    pub avg_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingStats {
    /// Index 0 is `h1`.
    pub levels: Vec<HeadingLevelStats>,
    /// Levels present, in order of first appearance.
    pub hierarchy: Vec<u8>,
    pub valid_hierarchy: bool,
    pub has_h1: bool,
}

impl HeadingStats {
    pub fn count(&self, level: u8) -> usize {
        self.level(level).map_or(0, |l| l.count)
    }

    pub fn level(&self, level: u8) -> Option<&HeadingLevelStats> {
        (1..=6)
            .contains(&level)
            .then(|| &self.levels[usize::from(level) - 1])
    }

    pub fn total(&self) -> usize {
        self.levels.iter().map(|l| l.count).sum()
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// A first-appearance level sequence is valid when no level goes more
/// than one step deeper than the level observed before it.
pub fn is_valid_hierarchy(first_seen: &[u8]) -> bool {
    first_seen.windows(2).all(|w| w[1] <= w[0] + 1)
}

pub fn extract_heading_stats(root: &DomNode) -> HeadingStats {
    let mut levels: Vec<HeadingLevelStats> = (1..=6)
        .map(|level| HeadingLevelStats {
            level,
            ..Default::default()
        })
        .collect();
    let mut hierarchy: Vec<u8> = Vec::new();

    root.walk_elements(&mut |node| {
        let Some(level) = heading_level(&node.tag) else {
            return;
        };
        let text = node.text_content();
        let title = HeadingTitle {
            length: text.chars().count(),
            words: text.split_whitespace().count(),
            text,
        };
        let stats = &mut levels[usize::from(level) - 1];
        stats.count += 1;
        stats.total_length += title.length;
        stats.titles.push(title);
        if !hierarchy.contains(&level) {
            hierarchy.push(level);
        }
    });

    for stats in &mut levels {
        if stats.count > 0 {
            stats.avg_length = (stats.total_length as f64 / stats.count as f64).round() as usize;
        }
    }

    let valid_hierarchy = is_valid_hierarchy(&hierarchy);
    if !valid_hierarchy {
        log::debug!("heading hierarchy skips a level: {:?}", hierarchy);
    }

    HeadingStats {
        has_h1: levels[0].count > 0,
        levels,
        hierarchy,
        valid_hierarchy,
    }
}
