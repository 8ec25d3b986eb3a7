//! Operator identity, roles and permissions.
//!
//! The signed-in staff member is passed explicitly to whatever needs it: the store stamps
//! `recordedBy` from [`Operator::name`], and the API gates routes on [`Role::can`].

use crate::{CoreError, CoreResult};
use hms_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Staff role assigned at sign-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Doctor,
    Pharmacist,
    Technician,
    Receptionist,
    StaffNurse,
}

/// Something a role may be allowed to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    Dashboard,
    Registration,
    OpdQueue,
    IpdQueue,
    LabRequests,
    DoctorModule,
    Pharmacy,
    StaffDashboard,
    RecordVitals,
    RequestAiSummary,
}

impl Permission {
    pub const ALL: [Permission; 10] = [
        Permission::Dashboard,
        Permission::Registration,
        Permission::OpdQueue,
        Permission::IpdQueue,
        Permission::LabRequests,
        Permission::DoctorModule,
        Permission::Pharmacy,
        Permission::StaffDashboard,
        Permission::RecordVitals,
        Permission::RequestAiSummary,
    ];
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Doctor,
        Role::Pharmacist,
        Role::Technician,
        Role::Receptionist,
        Role::StaffNurse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Pharmacist => "pharmacist",
            Role::Technician => "technician",
            Role::Receptionist => "receptionist",
            Role::StaffNurse => "staff-nurse",
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        use Permission::*;

        match self {
            Role::Admin => true,
            Role::Doctor => matches!(
                permission,
                Dashboard | OpdQueue | IpdQueue | DoctorModule | RecordVitals | RequestAiSummary
            ),
            Role::StaffNurse => matches!(
                permission,
                Dashboard | OpdQueue | IpdQueue | StaffDashboard | RecordVitals | RequestAiSummary
            ),
            Role::Receptionist => {
                matches!(permission, Dashboard | Registration | OpdQueue | IpdQueue)
            }
            Role::Technician => matches!(permission, Dashboard | LabRequests),
            Role::Pharmacist => matches!(permission, Dashboard | Pharmacy),
        }
    }

    /// Permissions granted to this role, in [`Permission::ALL`] order.
    pub fn permissions(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.can(*p))
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

/// The staff member operating the current session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub name: NonEmptyText,
    pub role: Role,
}

impl Operator {
    pub fn new(id: impl Into<String>, name: &str, role: Role) -> CoreResult<Self> {
        Ok(Self {
            id: id.into(),
            name: NonEmptyText::new(name)?,
            role,
        })
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.role.can(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_every_permission() {
        assert_eq!(Role::Admin.permissions(), Permission::ALL.to_vec());
    }

    #[test]
    fn every_role_sees_the_dashboard() {
        for role in Role::ALL {
            assert!(role.can(Permission::Dashboard), "{role} lacks dashboard");
        }
    }

    #[test]
    fn vitals_recording_is_limited_to_clinical_roles() {
        let allowed: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|r| r.can(Permission::RecordVitals))
            .collect();
        assert_eq!(allowed, vec![Role::Admin, Role::Doctor, Role::StaffNurse]);
    }

    #[test]
    fn receptionist_registers_and_sees_queues_only() {
        assert_eq!(
            Role::Receptionist.permissions(),
            vec![
                Permission::Dashboard,
                Permission::Registration,
                Permission::OpdQueue,
                Permission::IpdQueue
            ]
        );
    }

    #[test]
    fn role_parses_wire_names() {
        assert_eq!("staff-nurse".parse::<Role>().unwrap(), Role::StaffNurse);
        assert_eq!(" Doctor ".parse::<Role>().unwrap(), Role::Doctor);
        assert!(matches!(
            "surgeon".parse::<Role>(),
            Err(CoreError::UnknownRole(r)) if r == "surgeon"
        ));
    }

    #[test]
    fn role_serializes_kebab_case() {
        let json = serde_json::to_string(&Role::StaffNurse).unwrap();
        assert_eq!(json, "\"staff-nurse\"");
    }

    #[test]
    fn operator_requires_a_name() {
        let err = Operator::new("u1", "  ", Role::Doctor).expect_err("blank name");
        assert!(matches!(err, CoreError::Text(_)));
    }
}
