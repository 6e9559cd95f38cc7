use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Hierarchy levels of the forecast area tree, from the finest to the coarsest.
#[derive(
    Debug,
    Hash,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumString,
    IntoStaticStr,
    EnumIter,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AreaLevel {
    /// A municipality (市町村等).
    City,
    /// A group of municipalities (市町村等をまとめた地域等).
    Matome,
    /// A primary subdivision (一次細分区域).
    Ichiji,
    /// A prefectural forecast district used for warnings (府県予報区).
    Fuken,
    /// An announcement subdivision used for tornado watches (発表細分).
    Saibun,
    /// A code from the master table with no place in the hierarchy.
    Other,
}

impl AreaLevel {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// The parent levels a record at this level may reference.
    pub fn legal_parents(self) -> &'static [AreaLevel] {
        use AreaLevel::*;

        match self {
            City => &[Matome, Ichiji, Fuken, Saibun],
            Matome => &[Ichiji, Fuken, Saibun],
            Ichiji => &[Fuken, Saibun],
            Fuken | Saibun | Other => &[],
        }
    }

    /// Test to see if a record at this level may carry a reference to `parent`.
    pub fn may_reference(self, parent: AreaLevel) -> bool {
        self.legal_parents().contains(&parent)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
