//! The session-long mistake ledger.

use crate::model::{DishId, TableId, TicketId};
use brigade_framework::Seconds;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MistakeKind {
    /// A dish decayed on the pass before it was served.
    DeadDish,
    /// A dish type was served to a table whose order never contained it.
    WrongTable,
    /// A dish was served into a course that was still locked.
    PrematureDish,
    /// A course was completed across more than one service.
    StaggeredCourse,
}

impl Display for MistakeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MistakeKind::DeadDish => "dead dish",
            MistakeKind::WrongTable => "wrong table",
            MistakeKind::PrematureDish => "premature dish",
            MistakeKind::StaggeredCourse => "staggered course",
        };
        f.write_str(label)
    }
}

/// One immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mistake {
    pub kind: MistakeKind,
    pub at: Seconds,
    pub ticket: Option<TicketId>,
    pub course: Option<u32>,
    pub table: Option<TableId>,
    pub dish: Option<DishId>,
    pub dish_type: Option<String>,
    pub description: String,
}

impl Mistake {
    pub fn new(kind: MistakeKind, at: Seconds, description: impl Into<String>) -> Self {
        Self {
            kind,
            at,
            ticket: None,
            course: None,
            table: None,
            dish: None,
            dish_type: None,
            description: description.into(),
        }
    }

    pub fn with_ticket(mut self, ticket: TicketId) -> Self {
        self.ticket = Some(ticket);
        self
    }

    pub fn with_course(mut self, course: u32) -> Self {
        self.course = Some(course);
        self
    }

    pub fn with_table(mut self, table: TableId) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_dish(mut self, dish: DishId) -> Self {
        self.dish = Some(dish);
        self
    }

    pub fn with_dish_type(mut self, dish_type: impl Into<String>) -> Self {
        self.dish_type = Some(dish_type.into());
        self
    }
}

/// Append-only list of mistakes for a session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MistakeLedger {
    entries: Vec<Mistake>,
}

impl MistakeLedger {
    pub fn push(&mut self, mistake: Mistake) {
        self.entries.push(mistake);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mistake> + '_ {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Mistake] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: MistakeKind) -> usize {
        self.entries.iter().filter(|m| m.kind == kind).count()
    }

    pub fn counts_by_kind(&self) -> BTreeMap<MistakeKind, usize> {
        let mut counts = BTreeMap::new();
        for mistake in &self.entries {
            *counts.entry(mistake.kind).or_insert(0) += 1;
        }
        counts
    }
}
