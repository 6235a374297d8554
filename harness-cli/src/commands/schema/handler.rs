use rst_common::standard::serde_json;
use rst_common::with_logging::log::debug;

use identity_harness_admin::Harness;
use identity_harness_core::agent::schema::types::SchemaDefinition;
use identity_harness_core::agent::schema::SchemaPublisher;

use crate::commands::agents::get_agent_client;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::print_json;

use super::SchemaCommands;

/// `tails_file_count` prefers the flag, then the `[ledger]` section of `conf_file`
pub(crate) fn tails_file_count(
    flag: Option<u32>,
    conf_file: Option<&str>,
) -> Result<Option<u32>, CliError> {
    if flag.is_some() {
        return Ok(flag);
    }

    conf_file
        .map(|conf_file| {
            Harness::new(conf_file)
                .map(|harness| harness.config().ledger().tails_file_count())
                .map_err(|err| CliError::ConfigError(err.to_string()))
        })
        .transpose()
}

pub async fn handle_commands(ctx: &ContextHandler, commands: SchemaCommands) -> Result<(), CliError> {
    debug!("schema command handler triggered...");

    match commands {
        SchemaCommands::Publish(args) => {
            let mut definition = SchemaDefinition::new(&args.name, args.attributes)
                .with_revocation(args.revocation);

            if let Some(version) = &args.version {
                definition = definition.with_version(version);
            }

            if let Some(tag) = &args.tag {
                definition = definition.with_tag(tag);
            }

            let count = tails_file_count(args.tails_file_count, args.config.as_deref())?;
            let publisher = match count {
                Some(count) => SchemaPublisher::new(get_agent_client(ctx)?).with_tails_file_count(count),
                None => SchemaPublisher::new(get_agent_client(ctx)?),
            };

            let published = publisher
                .publish(&definition)
                .await
                .map_err(|err| CliError::AdminError(err.to_string()))?;

            let value = serde_json::to_value(&published)
                .map_err(|err| CliError::JSONError(err.to_string()))?;
            print_json(&value)?;
        }
    }

    Ok(())
}
