use resource_slice::ActionError;
use serde::{Deserialize, Serialize};

/// One leader/member pairing on a cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoTeamMember {
    #[serde(default)]
    pub leader_name: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub leader_id: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub member_id: String,
    #[serde(deserialize_with = "super::lenient::string")]
    pub cost_center: String,
    #[serde(default)]
    pub cost_center_name: String,
    #[serde(default)]
    pub cost_center_short_name: String,
}

impl PoTeamMember {
    pub fn key(&self) -> PoMemberKey {
        PoMemberKey::new(&self.leader_id, &self.member_id, &self.cost_center)
    }
}

/// Body of both the add and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoMemberKey {
    pub team_leader: String,
    pub team_member: String,
    pub cost_center: String,
}

impl PoMemberKey {
    pub fn new(leader: &str, member: &str, cost_center: &str) -> Self {
        Self {
            team_leader: leader.trim().to_string(),
            team_member: member.trim().to_string(),
            cost_center: cost_center.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ActionError> {
        let fields = [&self.team_leader, &self.team_member, &self.cost_center];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ActionError::Validation("Please fill all fields".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_row_maps_to_wire_key() {
        let row: PoTeamMember = serde_json::from_value(json!({
            "leader_name": "Meera",
            "member_name": "Arjun",
            "leader_id": "U1",
            "member_id": 2,
            "cost_center": "CC10",
            "cost_center_name": "Stores",
            "cost_center_short_name": "ST"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(row.key()).unwrap(),
            json!({"team_leader": "U1", "team_member": "2", "cost_center": "CC10"})
        );
    }

    #[test]
    fn all_three_ids_are_required() {
        assert_eq!(
            PoMemberKey::new("U1", " ", "CC10").validate(),
            Err(ActionError::Validation("Please fill all fields".into()))
        );
        assert!(PoMemberKey::new("U1", "U2", "CC10").validate().is_ok());
    }
}
