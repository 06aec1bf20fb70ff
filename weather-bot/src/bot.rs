//! Telegram dispatch wiring: three message categories, one endpoint each.
//!
//! Each exchange is single-turn; the bot keeps no conversation state and
//! only re-prompts for the next city in every reply.

use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters, prelude::*, types::ParseMode, utils::command::BotCommands,
};
use tracing::{info, warn};
use weather_core::WeatherProvider;

const GREETING: &str = "Hello! I am a bot that reports current weather conditions.\n\
     To get a report, send me a city name in English or Russian.";

const TEXT_ONLY_NOTICE: &str = "This bot only understands plain text messages \
     with the name of a city in English or Russian.";

const NEXT_CITY_PROMPT: &str = "\n\nTo continue, enter another city:";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    /// Show the greeting and usage instructions.
    Start,
}

/// Which of the three handled categories an inbound message falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InboundKind {
    Command,
    CityQuery,
    NonText,
}

fn classify_text(text: Option<&str>) -> InboundKind {
    match text {
        Some(t) if t.starts_with('/') => InboundKind::Command,
        Some(_) => InboundKind::CityQuery,
        None => InboundKind::NonText,
    }
}

/// Normalize a message body into a city name for the provider.
fn city_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Run the dispatcher until shutdown. The update loop itself is owned by
/// teloxide; our handlers are invoked as callbacks within it.
pub async fn run(bot: Bot, provider: Arc<dyn WeatherProvider>) {
    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(
            dptree::filter(|msg: Message| classify_text(msg.text()) == InboundKind::CityQuery)
                .endpoint(on_city_query),
        )
        .branch(
            dptree::filter(|msg: Message| classify_text(msg.text()) == InboundKind::NonText)
                .endpoint(on_non_text),
        );

    // Unknown commands and non-message updates fall through all branches
    // and are dropped by the dispatcher's default handler.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![provider])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            info!("handling /start command");
            bot.send_message(msg.chat.id, GREETING).await?;
        }
    }
    Ok(())
}

async fn on_city_query(
    bot: Bot,
    msg: Message,
    provider: Arc<dyn WeatherProvider>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let city = city_query(text);

    info!(city = %city, "handling weather request");

    let report = provider.report_for_city(&city).await;

    bot.send_message(msg.chat.id, format!("{report}{NEXT_CITY_PROMPT}"))
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

async fn on_non_text(bot: Bot, msg: Message) -> ResponseResult<()> {
    info!("handling non-text message");

    // Best effort: the bot may lack delete rights in this chat.
    if let Err(err) = bot.delete_message(msg.chat.id, msg.id).await {
        warn!(error = %err, "failed to delete non-text message");
    }

    bot.send_message(msg.chat.id, TEXT_ONLY_NOTICE).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_routed_away_from_the_provider() {
        assert_eq!(classify_text(Some("/start")), InboundKind::Command);
        assert_eq!(classify_text(Some("/unknown")), InboundKind::Command);
    }

    #[test]
    fn plain_text_is_treated_as_a_city_query() {
        assert_eq!(classify_text(Some("London")), InboundKind::CityQuery);
        assert_eq!(classify_text(Some("Санкт-Петербург")), InboundKind::CityQuery);
    }

    #[test]
    fn non_text_messages_never_reach_the_provider() {
        assert_eq!(classify_text(None), InboundKind::NonText);
    }

    #[test]
    fn city_queries_are_trimmed_and_lowercased() {
        assert_eq!(city_query("  London "), "london");
        assert_eq!(city_query("МОСКВА"), "москва");
    }

    #[test]
    fn replies_re_prompt_for_the_next_city() {
        let reply = format!("report body{NEXT_CITY_PROMPT}");
        assert!(reply.ends_with("enter another city:"));
    }
}
