use log::warn;
use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::{app::App, command::Command, format};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub async fn run(bot: Bot, app: Arc<App>) {
    if let Err(err) = bot.set_my_commands(Command::menu()).await {
        warn!("Could not register the command menu: {}", err);
    }

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![app])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .filter_map(|msg: Message| msg.text().and_then(Command::parse))
        .endpoint(handle_command)
}

/// Runs a parsed command. Failures are logged and the chat hears nothing.
async fn handle_command(msg: Message, cmd: Command, app: Arc<App>) -> HandlerResult {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let mention = format::mention(user.id.0, &user.first_name, user.last_name.as_deref());

    if let Err(err) = app.execute(msg.chat.id, Some(msg.id), &mention, cmd).await {
        warn!("Command from {} in chat {} failed: {}", user.id.0, msg.chat.id.0, err);
    }
    Ok(())
}
