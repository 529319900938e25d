//! Project and task fixtures. Dates are relative to `now`.

use chrono::{DateTime, Duration, Utc};

use brandhub_brands::seed::{EVERGREEN_ID, QUANTUMLEAP_ID};
use brandhub_core::{BrandId, EntityId, Record};

use crate::project::{Project, ProjectStatus};
use crate::task::{Task, TaskStatus};

fn project(
    brand: &str,
    name: &str,
    description: &str,
    status: ProjectStatus,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Project {
    Project {
        brand_id: BrandId::new(brand),
        name: name.into(),
        description: description.into(),
        status,
        start_date: start,
        end_date: end,
    }
}

pub fn projects(now: DateTime<Utc>) -> Vec<Record<Project>> {
    let days = Duration::days;
    vec![
        Record::new(
            "proj-1",
            project(
                QUANTUMLEAP_ID,
                "Q3 Product Launch",
                "Coordinate all marketing efforts for the launch of Project Titan.",
                ProjectStatus::InProgress,
                now - days(30),
                now + days(60),
            ),
        ),
        Record::new(
            "proj-2",
            project(
                QUANTUMLEAP_ID,
                "Website Redesign",
                "Overhaul the corporate website with new branding and features.",
                ProjectStatus::Planning,
                now + days(10),
                now + days(100),
            ),
        ),
        Record::new(
            "proj-3",
            project(
                EVERGREEN_ID,
                "Holiday Gift Guide Campaign",
                "Create and promote the 2024 Holiday Gift Guide.",
                ProjectStatus::InProgress,
                now - days(15),
                now + days(45),
            ),
        ),
        Record::new(
            "proj-4",
            project(
                EVERGREEN_ID,
                "Supplier Transparency Report",
                "Publish a report on our ethical sourcing practices.",
                ProjectStatus::Completed,
                now - days(90),
                now - days(10),
            ),
        ),
    ]
}

pub fn tasks(now: DateTime<Utc>) -> Vec<Record<Task>> {
    let today = now.date_naive();
    let task = |brand: &str, project: &str, title: &str, offset: i64, status: TaskStatus| Task {
        project_id: Some(EntityId::new(project)),
        status,
        ..Task::new(brand, title, today + Duration::days(offset))
    };

    vec![
        Record::new(
            "task-1",
            task(QUANTUMLEAP_ID, "proj-1", "Draft launch press release", 5, TaskStatus::InProgress),
        ),
        Record::new(
            "task-2",
            task(QUANTUMLEAP_ID, "proj-1", "Finalize ad copy for LinkedIn", 10, TaskStatus::ToDo),
        ),
        Record::new(
            "task-3",
            task(QUANTUMLEAP_ID, "proj-1", "Schedule launch day social posts", 12, TaskStatus::ToDo),
        ),
        Record::new(
            "task-4",
            task(EVERGREEN_ID, "proj-3", "Photoshoot for gift guide products", -2, TaskStatus::Completed),
        ),
        Record::new(
            "task-5",
            task(EVERGREEN_ID, "proj-3", "Design email announcement", 3, TaskStatus::InProgress),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_task_points_at_a_seeded_project_of_its_brand() {
        let now = Utc::now();
        let projects = projects(now);
        for task in tasks(now) {
            let project_id = task.project_id.clone().unwrap();
            let project = projects.iter().find(|p| p.id == project_id).unwrap();
            assert_eq!(project.brand_id, task.brand_id);
        }
    }

    #[test]
    fn seeded_tasks_are_not_overdue_unless_completed() {
        let now = Utc::now();
        assert!(tasks(now).iter().all(|t| !t.is_overdue(now.date_naive())));
    }
}
