//! Tab identifiers and the telemetry selection each tab implies.

use std::fmt;

use searchctl_core::{NodeKind, ViewSelection};

/// Identifies each tab, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Crawlers, // 1
    Indexers, // 2
    Domains,  // 3
    Keywords, // 4
}

impl ScreenId {
    /// All tabs in tab-bar order.
    pub const ALL: [ScreenId; 4] = [Self::Crawlers, Self::Indexers, Self::Domains, Self::Keywords];

    pub fn number(self) -> u8 {
        match self {
            Self::Crawlers => 1,
            Self::Indexers => 2,
            Self::Domains => 3,
            Self::Keywords => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Crawlers),
            2 => Some(Self::Indexers),
            3 => Some(Self::Domains),
            4 => Some(Self::Keywords),
            _ => None,
        }
    }

    /// Next tab (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Crawlers => "Crawlers",
            Self::Indexers => "Indexers",
            Self::Domains => "Domains",
            Self::Keywords => "Keywords",
        }
    }

    /// Telemetry views to poll while this tab is visible.
    ///
    /// The management tabs show no telemetry, so the poller idles on them.
    pub fn selection(self) -> ViewSelection {
        match self {
            Self::Crawlers => ViewSelection::only(NodeKind::Crawler),
            Self::Indexers => ViewSelection::only(NodeKind::Indexer),
            Self::Domains | Self::Keywords => ViewSelection::NONE,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_round_trip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(screen.number()), Some(screen));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(5), None);
    }

    #[test]
    fn navigation_wraps() {
        assert_eq!(ScreenId::Keywords.next(), ScreenId::Crawlers);
        assert_eq!(ScreenId::Crawlers.prev(), ScreenId::Keywords);
        assert_eq!(ScreenId::Indexers.next(), ScreenId::Domains);
    }

    #[test]
    fn only_telemetry_tabs_poll() {
        assert_eq!(
            ScreenId::Crawlers.selection(),
            ViewSelection {
                crawler: true,
                indexer: false
            }
        );
        assert_eq!(
            ScreenId::Indexers.selection(),
            ViewSelection {
                crawler: false,
                indexer: true
            }
        );
        assert_eq!(ScreenId::Domains.selection(), ViewSelection::NONE);
        assert_eq!(ScreenId::Keywords.selection(), ViewSelection::NONE);
    }
}
