//! Partitioned dataset members.

use tracing::{debug, instrument};

use zosmf_client::response::status;
use zosmf_client::validation::{encode_path_segment, validate_dataset_name};

use super::DatasetManager;
use crate::error::Result;
use crate::types::{CopyBody, DatasetMember, MemberList};
use crate::validation::validate_names;

impl DatasetManager {
    fn members_path(dataset: &str) -> String {
        format!("{}/member", Self::dataset_path(dataset))
    }

    fn member_path(dataset: &str, member: &str) -> String {
        format!("{}/{}", Self::members_path(dataset), encode_path_segment(member))
    }

    /// Members of a partitioned dataset.
    #[instrument(skip(self))]
    pub async fn list_members(&self, dataset: &str) -> Result<MemberList> {
        validate_dataset_name(dataset)?;

        let request = self.session.get(&Self::members_path(dataset));
        let response = self.session.send(request, status::OK).await?;
        let members: MemberList = response.json()?;
        debug!(count = members.len(), "Listed members");
        Ok(members)
    }

    #[instrument(skip(self))]
    pub async fn get_member(&self, dataset: &str, member: &str) -> Result<DatasetMember> {
        validate_names(dataset, Some(member))?;

        let request = self.session.get(&Self::member_path(dataset, member));
        let response = self.session.send(request, status::OK).await?;
        Ok(response.json()?)
    }

    #[instrument(skip(self))]
    pub async fn delete_member(&self, dataset: &str, member: &str) -> Result<()> {
        validate_names(dataset, Some(member))?;

        let request = self.session.delete(&Self::member_path(dataset, member));
        self.session.send(request, status::NO_CONTENT).await?;
        Ok(())
    }

    /// Copy one member to another, possibly in a different dataset. The
    /// request goes to the target member.
    #[instrument(skip(self))]
    pub async fn copy_member(
        &self,
        source_dataset: &str,
        source_member: &str,
        target_dataset: &str,
        target_member: &str,
    ) -> Result<()> {
        validate_names(source_dataset, Some(source_member))?;
        validate_names(target_dataset, Some(target_member))?;

        let path = format!(
            "{}({})",
            Self::dataset_path(target_dataset),
            encode_path_segment(target_member)
        );
        let request = self
            .session
            .put(&path)
            .json(&CopyBody::copy_member(source_dataset, source_member))?;
        self.session.send(request, status::CREATED).await?;
        Ok(())
    }

    pub async fn copy_member_to_same_dataset(
        &self,
        dataset: &str,
        source_member: &str,
        target_member: &str,
    ) -> Result<()> {
        self.copy_member(dataset, source_member, dataset, target_member)
            .await
    }

    pub async fn copy_member_with_same_name(
        &self,
        source_dataset: &str,
        target_dataset: &str,
        member: &str,
    ) -> Result<()> {
        self.copy_member(source_dataset, member, target_dataset, member)
            .await
    }
}
