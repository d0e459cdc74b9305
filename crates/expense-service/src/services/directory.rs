//! Directory lookups used to route notifications
//!
//! Nothing here fails: a lookup error is logged and reads as "nobody found",
//! since a missing approver is a normal condition for the engine.

use tracing::{error, instrument, warn};

use expense_core::entities::User;
use expense_core::value_objects::{CompanyId, Role, UserId};

use super::context::ServiceContext;

/// Directory service
pub struct DirectoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DirectoryService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Look up one user
    #[instrument(skip(self))]
    pub async fn find_user(&self, user_id: UserId) -> Option<User> {
        match self.ctx.user_directory().find_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "User lookup failed");
                None
            }
        }
    }

    /// Users with `role` in `company_id`, optionally only those with a chat id
    #[instrument(skip(self))]
    pub async fn find_users(
        &self,
        company_id: CompanyId,
        role: Role,
        require_address: bool,
    ) -> Vec<User> {
        match self
            .ctx
            .user_directory()
            .find_by_role(company_id, role, require_address)
            .await
        {
            Ok(users) => users,
            Err(e) => {
                error!(
                    company_id = %company_id,
                    role = %role,
                    error = %e,
                    "Directory lookup failed"
                );
                Vec::new()
            }
        }
    }

    /// First reachable director of the company
    pub async fn director_for_company(&self, company_id: CompanyId) -> Option<User> {
        self.first_reachable(company_id, Role::Director).await
    }

    /// First reachable cashier of the company
    pub async fn cashier_for_company(&self, company_id: CompanyId) -> Option<User> {
        self.first_reachable(company_id, Role::Cashier).await
    }

    async fn first_reachable(&self, company_id: CompanyId, role: Role) -> Option<User> {
        let user = self.find_users(company_id, role, true).await.into_iter().next();
        if user.is_none() {
            warn!(company_id = %company_id, role = %role, "No reachable user with role in company");
        }
        user
    }
}
