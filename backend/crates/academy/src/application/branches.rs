//! Branch Catalogue Use Case

use std::sync::Arc;

use crate::domain::entity::Branch;
use crate::domain::repository::BranchRepository;
use crate::error::AcademyResult;

/// Branch listing use case
pub struct ListBranchesUseCase<B>
where
    B: BranchRepository,
{
    branches: Arc<B>,
}

impl<B> ListBranchesUseCase<B>
where
    B: BranchRepository,
{
    pub fn new(branches: Arc<B>) -> Self {
        Self { branches }
    }

    pub async fn execute(&self) -> AcademyResult<Vec<Branch>> {
        self.branches.list().await
    }
}
