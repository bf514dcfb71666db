use twilight_model::{gateway::payload::incoming::InteractionCreate, guild::Permissions};

/// Check whether the interacting member has a required permission (or administrator).
///
/// Returns `false` outside a guild context or when Discord did not resolve
/// the member's permissions.
pub fn has_interaction_permission(interaction: &InteractionCreate, required: Permissions) -> bool {
    interaction
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|perms| grants(perms, required))
}

/// Whether `perms` satisfies `required`, treating administrator as a wildcard.
pub fn grants(perms: Permissions, required: Permissions) -> bool {
    perms.contains(Permissions::ADMINISTRATOR) || perms.contains(required)
}
