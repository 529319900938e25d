use serde::{Deserialize, Serialize};

use brandhub_core::{BrandId, BrandScoped, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Trigger,
    Action,
    Delay,
    Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl AutomationNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: String::new(),
        }
    }
}

/// A trigger followed by ordered steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationWorkflow {
    pub brand_id: BrandId,
    pub name: String,
    pub description: String,
    pub trigger: AutomationNode,
    #[serde(default)]
    pub steps: Vec<AutomationNode>,
    pub active: bool,
}

impl EntityKind for AutomationWorkflow {
    const COLLECTION: &'static str = "db_automations";
}

impl BrandScoped for AutomationWorkflow {
    fn belongs_to(&self, brand: &BrandId) -> bool {
        &self.brand_id == brand
    }
}

impl AutomationWorkflow {
    pub fn count_steps(&self, kind: NodeKind) -> usize {
        self.steps.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_wire_shape() {
        let node = AutomationNode::new("n1", NodeKind::Trigger, "New Lead");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "trigger");
        assert_eq!(value["description"], "");
    }

    #[test]
    fn counts_steps_by_kind() {
        let workflow = AutomationWorkflow {
            brand_id: BrandId::new("brand-1"),
            name: "Nurture".into(),
            description: String::new(),
            trigger: AutomationNode::new("n1", NodeKind::Trigger, "New Lead"),
            steps: vec![
                AutomationNode::new("n2", NodeKind::Action, "Email"),
                AutomationNode::new("n3", NodeKind::Delay, "Wait"),
                AutomationNode::new("n4", NodeKind::Action, "Case Study"),
            ],
            active: true,
        };
        assert_eq!(workflow.count_steps(NodeKind::Action), 2);
        assert_eq!(workflow.count_steps(NodeKind::Condition), 0);
    }
}
