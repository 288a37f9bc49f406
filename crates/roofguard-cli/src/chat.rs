//! Interactive dispatch and sales chats.
//!
//! Both chats keep a local [`Conversation`] and replay it to the gateway on
//! every turn. A turn is awaited before the next line is read, so calls never
//! overlap. Provider failures become system messages in the transcript
//! instead of ending the session.

use std::io::Write as _;

use chrono::Local;
use roofguard_core::chat::{DISPATCH_GREETING, SALES_FALLBACK, SALES_GREETING};
use roofguard_core::{ChatMessage, Conversation, LocationState, Role, Roofer};
use roofguard_gemini::{GatewayError, RoofGateway};
use tokio::io::{AsyncBufReadExt, BufReader};

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Run the emergency dispatch chat.
///
/// With `message` set, sends that single turn and prints the reply;
/// otherwise reads turns from stdin until EOF or `exit`.
///
/// # Errors
///
/// Returns an error only if stdin or stdout fail. Gateway failures are
/// shown in the transcript.
pub(crate) async fn run_dispatch_chat(
    gateway: &RoofGateway,
    message: Option<&str>,
    location: &LocationState,
) -> anyhow::Result<()> {
    let mut conversation = Conversation::with_greeting(DISPATCH_GREETING);
    print_last(&conversation);

    if let Some(message) = message {
        dispatch_turn(gateway, &mut conversation, message, location).await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = next_input(&mut lines).await? {
        dispatch_turn(gateway, &mut conversation, &line, location).await;
    }
    Ok(())
}

/// Run the partner sales chat. Same input handling as the dispatch chat.
///
/// # Errors
///
/// Returns an error only if stdin or stdout fail.
pub(crate) async fn run_sales_chat(
    gateway: &RoofGateway,
    message: Option<&str>,
) -> anyhow::Result<()> {
    let mut conversation = Conversation::with_greeting(SALES_GREETING);
    print_last(&conversation);

    if let Some(message) = message {
        sales_turn(gateway, &mut conversation, message).await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = next_input(&mut lines).await? {
        sales_turn(gateway, &mut conversation, &line).await;
    }
    Ok(())
}

/// Sends one dispatch turn and records the reply, or a safety alert on failure.
pub(crate) async fn dispatch_turn(
    gateway: &RoofGateway,
    conversation: &mut Conversation,
    message: &str,
    location: &LocationState,
) {
    let reply = gateway
        .send_emergency_message(message, conversation.messages(), Some(location))
        .await;

    conversation.push_user(message);
    match reply {
        Ok(reply) => {
            conversation.push_assistant(reply.text, reply.roofers);
        }
        Err(e) => {
            conversation.push_system(connection_issue(&e), true);
        }
    }
    print_last(conversation);
}

/// Sends one sales turn and records the reply, or the maintenance fallback.
pub(crate) async fn sales_turn(gateway: &RoofGateway, conversation: &mut Conversation, message: &str) {
    let reply = gateway
        .engage_partner_sales(message, conversation.messages())
        .await;

    conversation.push_user(message);
    match reply {
        Ok(text) => {
            conversation.push_assistant(text, Vec::new());
        }
        Err(e) => {
            tracing::debug!(error = %e, "sales reply replaced by fallback");
            conversation.push_system(SALES_FALLBACK, false);
        }
    }
    print_last(conversation);
}

/// Reads the next non-blank line. `None` on EOF or an exit word.
async fn next_input<R>(
    lines: &mut tokio::io::Lines<BufReader<R>>,
) -> anyhow::Result<Option<String>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();
        if EXIT_WORDS.contains(&line) {
            return Ok(None);
        }
        if !line.is_empty() {
            return Ok(Some(line.to_string()));
        }
    }
}

fn print_last(conversation: &Conversation) {
    if let Some(message) = conversation.last() {
        println!("{}", render_message(message));
    }
}

/// Transcript text for a failed dispatch call.
pub(crate) fn connection_issue(error: &GatewayError) -> String {
    format!(
        "Connection Issue: {error} Please check your connection or call emergency services \
         if you are in immediate danger."
    )
}

pub(crate) fn render_message(message: &ChatMessage) -> String {
    let time = message.timestamp().with_timezone(&Local).format("%H:%M");
    let speaker = match message.role() {
        Role::User => "You",
        Role::Assistant => "Roof Guard",
        Role::System if message.is_safety_alert() => "!! ALERT",
        Role::System => "System",
    };

    let mut out = format!("\n[{time}] {speaker}\n{}\n", message.content());
    for roofer in message.roofers() {
        out.push_str(&render_roofer(roofer));
    }
    out
}

pub(crate) fn render_roofer(roofer: &Roofer) -> String {
    let mut line = format!("  * {}", roofer.name);
    if let Some(rating) = roofer.rating {
        line.push_str(&format!("  rating {rating}"));
        if let Some(reviews) = roofer.reviews {
            line.push_str(&format!(" ({reviews} reviews)"));
        }
    }
    line.push('\n');

    for detail in [&roofer.address, &roofer.phone, &roofer.uri]
        .into_iter()
        .flatten()
    {
        line.push_str(&format!("      {detail}\n"));
    }
    if let Some(snippet) = &roofer.review_snippet {
        line.push_str(&format!("      \"{snippet}\"\n"));
    }
    line
}
