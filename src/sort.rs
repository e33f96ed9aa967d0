use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::Recommendation;

/// Fields a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Description,
    TestTypes,
    RemoteTesting,
    Duration,
    JobLevels,
    AdaptiveIrt,
    Languages,
    Url,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Same key flips the direction, a new key starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) {
            self.direction.flipped()
        } else {
            SortDirection::Ascending
        };

        Self {
            key: Some(key),
            direction,
        }
    }
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Name,
        SortKey::Description,
        SortKey::TestTypes,
        SortKey::RemoteTesting,
        SortKey::Duration,
        SortKey::JobLevels,
        SortKey::AdaptiveIrt,
        SortKey::Languages,
        SortKey::Url,
    ];

    /// Field value used for comparison; absent fields compare as "".
    pub fn value_of<'a>(&self, item: &'a Recommendation) -> &'a str {
        let field = match self {
            SortKey::Name => return item.name.as_str(),
            SortKey::Description => &item.description,
            SortKey::TestTypes => &item.test_types,
            SortKey::RemoteTesting => &item.remote_testing,
            SortKey::Duration => &item.duration,
            SortKey::JobLevels => &item.job_levels,
            SortKey::AdaptiveIrt => &item.adaptive_irt,
            SortKey::Languages => &item.languages,
            SortKey::Url => &item.url,
        };
        field.as_deref().unwrap_or("")
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Description => "description",
            SortKey::TestTypes => "test_types",
            SortKey::RemoteTesting => "remote_testing",
            SortKey::Duration => "duration",
            SortKey::JobLevels => "job_levels",
            SortKey::AdaptiveIrt => "adaptive_irt",
            SortKey::Languages => "languages",
            SortKey::Url => "url",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.field_name() == name)
    }
}

/// Display order of `items` under `config`, as indices into `items`.
///
/// The sort is stable in both directions, so ties keep their received order.
pub fn sorted_indices(items: &[Recommendation], config: SortConfig) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len()).collect();

    let Some(key) = config.key else {
        return indices;
    };

    indices.sort_by(|&a, &b| {
        let ordering = compare_values(key.value_of(&items[a]), key.value_of(&items[b]));
        match config.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    indices
}

/// Orders by UTF-16 code units, matching how the browser view compared strings.
/// Differs from `str::cmp` only between U+E000..U+FFFF and supplementary characters.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Borrowing variant of [`sorted_indices`].
pub fn sorted<'a>(items: &'a [Recommendation], config: SortConfig) -> Vec<&'a Recommendation> {
    sorted_indices(items, config)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}
