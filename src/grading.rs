//! Grade mapping and CGPA aggregation
//!
//! Pure functions used to derive letter grades and the cumulative grade point
//! average of a student. Derived values are always recomputed from the primary
//! fields, never carried over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade on the 4.0 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    /// 4.00 and above
    #[serde(rename = "A+")]
    APlus,
    /// 3.75 and above
    #[serde(rename = "A")]
    A,
    /// 3.50 and above
    #[serde(rename = "A-")]
    AMinus,
    /// 3.25 and above
    #[serde(rename = "B+")]
    BPlus,
    /// 3.00 and above
    #[serde(rename = "B")]
    B,
    /// 2.75 and above
    #[serde(rename = "B-")]
    BMinus,
    /// 2.50 and above
    #[serde(rename = "C+")]
    CPlus,
    /// 2.00 and above
    #[serde(rename = "C")]
    C,
    /// Below 2.00
    #[default]
    #[serde(rename = "F")]
    F,
}

/// Lower bound of each bracket, highest first. `F` catches everything else.
const BRACKETS: [(f64, Grade); 8] = [
    (4.00, Grade::APlus),
    (3.75, Grade::A),
    (3.50, Grade::AMinus),
    (3.25, Grade::BPlus),
    (3.00, Grade::B),
    (2.75, Grade::BMinus),
    (2.50, Grade::CPlus),
    (2.00, Grade::C),
];

impl Grade {
    /// Label as it appears in stored documents
    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }

    /// Numeric weight used when ordering by letter grade
    pub fn rank(&self) -> f64 {
        grade_rank(self.label())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a grade point (or a CGPA) to its letter grade.
///
/// Brackets are closed below. Values above 4.0 land in `A+`; anything under
/// 2.0, including negatives and NaN, is `F`.
pub fn point_to_grade(point: f64) -> Grade {
    BRACKETS
        .iter()
        .find(|(floor, _)| point >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// Numeric weight of a stored grade label. Unknown labels weigh 0.
pub fn grade_rank(label: &str) -> f64 {
    BRACKETS
        .iter()
        .find(|(_, grade)| grade.label() == label)
        .map(|(floor, _)| *floor)
        .unwrap_or(0.0)
}

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted average of `(credit, grade_point)` pairs, rounded with [`round2`].
///
/// Returns `None` when the credits sum to zero. Validated students always carry
/// positive credits, so this only happens when validation was skipped.
pub fn cgpa<I>(courses: I) -> Option<f64>
where
    I: IntoIterator<Item = (u32, f64)>,
{
    let (points, credits) = courses
        .into_iter()
        .fold((0.0_f64, 0_u32), |(points, credits), (credit, grade_point)| {
            (points + f64::from(credit) * grade_point, credits + credit)
        });

    if credits == 0 {
        return None;
    }
    Some(round2(points / f64::from(credits)))
}
