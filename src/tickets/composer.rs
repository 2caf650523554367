//! Random ticket composition for seated parties.
//!
//! Rules:
//! - course count is drawn from the configured range
//! - total dishes is the party size clamped to `[course_count, max_dishes]`
//! - every course gets one dish, the remainder lands on random courses
//! - first-course-only types never appear after course 1
//! - a type used in an earlier course is excluded from every later course
//! - a course holds at most as many dishes as it has eligible types; repeats are allowed

use crate::model::DishCatalog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TicketComposer {
    rng: StdRng,
    min_courses: u32,
    max_courses: u32,
    max_dishes: u32,
}

impl TicketComposer {
    pub fn new(seed: u64, min_courses: u32, max_courses: u32, max_dishes: u32) -> Self {
        let min_courses = min_courses.max(1);
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_courses,
            max_courses: max_courses.max(min_courses),
            max_dishes,
        }
    }

    /// Dish type names per course. Courses with no eligible types are left out, so the result
    /// may be shorter than the drawn course count, or empty.
    pub fn compose(&mut self, party_size: u32, catalog: &DishCatalog) -> Vec<Vec<String>> {
        let course_count = self.rng.gen_range(self.min_courses..=self.max_courses) as usize;
        let total = (party_size.min(self.max_dishes) as usize).max(course_count);

        let mut per_course = vec![1usize; course_count];
        for _ in course_count..total {
            let slot = self.rng.gen_range(0..course_count);
            per_course[slot] += 1;
        }

        let mut used: HashSet<&str> = HashSet::new();
        let mut courses = Vec::with_capacity(course_count);
        for (index, wanted) in per_course.into_iter().enumerate() {
            let eligible: Vec<&str> = catalog
                .iter()
                .filter(|d| index == 0 || !d.first_course_only)
                .map(|d| d.name.as_str())
                .filter(|name| !used.contains(name))
                .collect();
            let count = wanted.min(eligible.len());
            if count == 0 {
                debug!(course = index + 1, "No eligible dish types, course omitted");
                continue;
            }
            let picks: Vec<&str> = (0..count)
                .map(|_| eligible[self.rng.gen_range(0..eligible.len())])
                .collect();
            used.extend(picks.iter().copied());
            courses.push(picks.into_iter().map(String::from).collect());
        }
        courses
    }
}
