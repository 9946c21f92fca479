//! Role-based permission checks for staff commands.

use crate::framework::{Context, Error};
use mixhaven_common::RoleId;
use mixhaven_config::RolesConfig;
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

/// Staff groups a command can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffGroup {
    /// Administrators and founders: rate changes, ticket panel.
    Admin,
    /// Exchangers and founders: working tickets.
    Exchanger,
    /// Support, administrators and founders: closing tickets.
    Support,
}

impl StaffGroup {
    /// Role ids that satisfy this group.
    pub fn role_ids(self, roles: &RolesConfig) -> Vec<RoleId> {
        match self {
            Self::Admin => vec![roles.admin, roles.founder],
            Self::Exchanger => vec![roles.exchanger, roles.founder],
            Self::Support => vec![roles.support, roles.admin, roles.founder],
        }
    }
}

/// Whether any of `member_roles` is one of `allowed`.
pub fn holds_any_role(member_roles: &[serenity::RoleId], allowed: &[RoleId]) -> bool {
    member_roles
        .iter()
        .any(|role| allowed.iter().any(|a| a.0 == role.get()))
}

async fn member_in_group(ctx: Context<'_>, group: StaffGroup) -> Result<bool, Error> {
    let allowed = group.role_ids(&ctx.data().config.get().roles);

    let Some(member) = ctx.author_member().await else {
        debug!("No member data for {}, denying {:?} check", ctx.author().name, group);
        return Ok(false);
    };

    let granted = holds_any_role(&member.roles, &allowed);
    if !granted {
        warn!(
            "{} lacks a {:?} role for `{}`",
            ctx.author().name,
            group,
            ctx.command().qualified_name
        );
    }
    Ok(granted)
}

/// Administrators and founders.
pub async fn is_admin(ctx: Context<'_>) -> Result<bool, Error> {
    member_in_group(ctx, StaffGroup::Admin).await
}

/// Exchangers and founders.
pub async fn is_exchanger(ctx: Context<'_>) -> Result<bool, Error> {
    member_in_group(ctx, StaffGroup::Exchanger).await
}

/// Support staff, administrators and founders.
pub async fn is_support(ctx: Context<'_>) -> Result<bool, Error> {
    member_in_group(ctx, StaffGroup::Support).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> RolesConfig {
        RolesConfig {
            founder: RoleId(1),
            admin: RoleId(2),
            support: RoleId(3),
            exchanger: RoleId(4),
        }
    }

    #[test]
    fn test_group_membership() {
        let roles = roles();
        assert_eq!(StaffGroup::Admin.role_ids(&roles), vec![RoleId(2), RoleId(1)]);
        assert_eq!(StaffGroup::Exchanger.role_ids(&roles), vec![RoleId(4), RoleId(1)]);
        assert_eq!(
            StaffGroup::Support.role_ids(&roles),
            vec![RoleId(3), RoleId(2), RoleId(1)]
        );
    }

    #[test]
    fn test_holds_any_role() {
        let allowed = StaffGroup::Exchanger.role_ids(&roles());

        assert!(holds_any_role(&[serenity::RoleId::new(4)], &allowed));
        assert!(holds_any_role(
            &[serenity::RoleId::new(9), serenity::RoleId::new(1)],
            &allowed
        ));
        assert!(!holds_any_role(&[serenity::RoleId::new(3)], &allowed));
        assert!(!holds_any_role(&[], &allowed));
    }
}
