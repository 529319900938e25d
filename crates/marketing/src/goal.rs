use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub brand_id: BrandId,
    pub title: String,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl EntityKind for Goal {
    const COLLECTION: &'static str = "db_goals";
}

impl BrandScoped for Goal {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl Goal {
    /// Completed fraction of sub-tasks; `0.0` with none.
    pub fn progress(&self) -> f64 {
        if self.sub_tasks.is_empty() {
            return 0.0;
        }
        let done = self.sub_tasks.iter().filter(|s| s.completed).count();
        done as f64 / self.sub_tasks.len() as f64
    }

    /// Sub-tasks with `sub_task_id` flipped; `None` if there is no such id.
    pub fn toggled(&self, sub_task_id: &str) -> Option<Vec<SubTask>> {
        if !self.sub_tasks.iter().any(|s| s.id == sub_task_id) {
            return None;
        }
        Some(
            self.sub_tasks
                .iter()
                .map(|s| SubTask {
                    completed: if s.id == sub_task_id { !s.completed } else { s.completed },
                    ..s.clone()
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> Goal {
        Goal {
            brand_id: BrandId::new("brand-1"),
            title: "Thought leadership".into(),
            sub_tasks: vec![
                SubTask { id: "gst-1".into(), text: "Blog".into(), completed: true },
                SubTask { id: "gst-2".into(), text: "Webinar".into(), completed: false },
            ],
        }
    }

    #[test]
    fn toggling_flips_one_sub_task() {
        let toggled = goal().toggled("gst-2").unwrap();
        assert!(toggled.iter().all(|s| s.completed));
        assert_eq!(goal().toggled("missing"), None);
    }

    #[test]
    fn progress_is_completed_fraction() {
        assert_eq!(goal().progress(), 0.5);
        let empty = Goal { sub_tasks: vec![], ..goal() };
        assert_eq!(empty.progress(), 0.0);
    }
}
