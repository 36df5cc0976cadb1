//! Flattening of the MDMS organizational tree into tenant descriptors.

use crate::mdms::types::Zone;

/// Jurisdiction code prefixed onto every derived tenant id.
pub const TENANT_PREFIX: &str = "pb.";

/// One administrative tenant (a leaf project) with all ancestor names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantDescriptor {
    pub tenant_id: String,
    pub project_code: String,
    pub zone: String,
    pub circle: String,
    pub division: String,
    pub subdivision: String,
    pub section: String,
}

/// Flatten the 6-level tree into one descriptor per leaf project.
///
/// Emission order follows input traversal order; no sorting is applied.
pub fn flatten(zones: &[Zone]) -> Vec<TenantDescriptor> {
    let mut tenants = Vec::new();

    for zone in zones {
        for circle in &zone.circle {
            for division in &circle.division {
                for subdivision in &division.subdivision {
                    for section in &subdivision.section {
                        for project in &section.project {
                            tenants.push(TenantDescriptor {
                                tenant_id: format_tenant_id(&project.name),
                                project_code: project.code.clone(),
                                zone: zone.name.clone(),
                                circle: circle.name.clone(),
                                division: division.name.clone(),
                                subdivision: subdivision.name.clone(),
                                section: section.name.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    tenants
}

/// Derive a tenant id from a project display name: strip spaces, lower-case,
/// prefix with the jurisdiction code.
pub fn format_tenant_id(project_name: &str) -> String {
    format!(
        "{TENANT_PREFIX}{}",
        project_name.replace(' ', "").to_lowercase()
    )
}
