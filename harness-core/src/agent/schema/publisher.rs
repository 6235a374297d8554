use rst_common::standard::serde_json::json;
use rst_common::with_logging::log::{debug, info};

use crate::agent::admin::response::first_str;
use crate::agent::admin::types::{AdminAPI, AdminRequest};

use super::types::{
    random_version, PublishedSchema, SchemaDefinition, SchemaError, DEFAULT_CREDDEF_TAG,
    DEFAULT_TAILS_FILE_COUNT,
};

/// `SchemaPublisher` registers a schema and its credential definition on the ledger
/// through the issuer's admin API
#[derive(Clone)]
pub struct SchemaPublisher<TAdmin>
where
    TAdmin: AdminAPI,
{
    admin: TAdmin,
    tails_file_count: u32,
}

impl<TAdmin> SchemaPublisher<TAdmin>
where
    TAdmin: AdminAPI,
{
    pub fn new(admin: TAdmin) -> Self {
        Self {
            admin,
            tails_file_count: DEFAULT_TAILS_FILE_COUNT,
        }
    }

    pub fn with_tails_file_count(mut self, count: u32) -> Self {
        self.tails_file_count = count;
        self
    }

    pub async fn publish(
        &self,
        definition: &SchemaDefinition,
    ) -> Result<PublishedSchema, SchemaError> {
        if definition.name.is_empty() {
            return Err(SchemaError::InvalidSchema(String::from("missing name")));
        }

        if definition.attributes.is_empty() {
            return Err(SchemaError::InvalidSchema(String::from(
                "missing attributes",
            )));
        }

        let schema_version = definition.version.clone().unwrap_or_else(random_version);
        let response = self
            .admin
            .send(AdminRequest::post("/schemas").with_body(json!({
                "schema_name": definition.name,
                "schema_version": schema_version,
                "attributes": definition.attributes,
            })))
            .await?;

        let schema_id = first_str(&response, &["schema_id", "sent.schema_id"])?;
        debug!("[schema:publish] schema: {schema_id}");

        let mut body = json!({
            "schema_id": schema_id,
            "tag": definition.tag.as_deref().unwrap_or(DEFAULT_CREDDEF_TAG),
            "support_revocation": definition.support_revocation,
        });

        if definition.support_revocation {
            body["revocation_registry_size"] = json!(self.tails_file_count);
        }

        let response = self
            .admin
            .send(AdminRequest::post("/credential-definitions").with_body(body))
            .await?;

        let credential_definition_id = first_str(
            &response,
            &["credential_definition_id", "sent.credential_definition_id"],
        )?;

        info!("[schema:publish] credential definition: {credential_definition_id}");
        Ok(PublishedSchema {
            schema_id,
            schema_version,
            credential_definition_id,
        })
    }
}
