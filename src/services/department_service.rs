//! Departments known to the data manager.

use std::sync::Arc;

use crate::errors::ApiError;
use crate::mcom::{CallContext, DataManager};
use crate::models::{DepartmentIdData, Principal};

pub struct DepartmentService {
    dm: Arc<dyn DataManager>,
}

impl DepartmentService {
    pub fn new(dm: Arc<dyn DataManager>) -> Self {
        Self { dm }
    }

    pub async fn department_ids(&self, principal: &Principal) -> Result<Vec<DepartmentIdData>, ApiError> {
        let reply = self.dm.list_all_departments(&CallContext::user(&principal.id)).await?;
        Ok(reply
            .ids
            .into_iter()
            .map(|department_id| DepartmentIdData { department_id })
            .collect())
    }
}
