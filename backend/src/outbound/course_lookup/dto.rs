//! Wire shapes for the course lookup endpoint.
//!
//! The request carries ids in ascending order; the response is a bare JSON
//! array of course summaries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{CourseId, CourseSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CourseLookupRequestDto {
    pub(super) course_ids: Vec<i64>,
}

impl From<&BTreeSet<CourseId>> for CourseLookupRequestDto {
    fn from(ids: &BTreeSet<CourseId>) -> Self {
        Self {
            course_ids: ids.iter().map(|id| id.get()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CourseSummaryDto {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) description: String,
}

impl From<CourseSummaryDto> for CourseSummary {
    fn from(dto: CourseSummaryDto) -> Self {
        Self {
            id: CourseId::new(dto.id),
            title: dto.title,
            description: dto.description,
        }
    }
}
