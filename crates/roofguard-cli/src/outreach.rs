//! Outreach crew: drafts a partner invitation email.

use std::time::Duration;

use roofguard_core::{AgentCrew, AgentStatus};
use roofguard_gemini::RoofGateway;

use crate::email_html::render_email_html;

const RESEARCH_PHASE: Duration = Duration::from_millis(2000);
const COMPLIANCE_PHASE: Duration = Duration::from_millis(1000);

/// Run the outreach crew for one target company and print the email.
///
/// The crew statuses are presentation only: the gateway call starts
/// immediately and the researcher hands off after a fixed delay whether or
/// not the call has finished.
///
/// # Errors
///
/// Returns an error if the email could not be generated. The crew is
/// printed in its halted state first.
pub(crate) async fn run_outreach(
    gateway: &RoofGateway,
    company: &str,
    city: &str,
    website: Option<&str>,
    instructions: Option<&str>,
    html: bool,
) -> anyhow::Result<()> {
    let mut crew = AgentCrew::outreach();
    let target = if company.trim().is_empty() {
        "target"
    } else {
        company
    };
    crew.update(
        "o1",
        AgentStatus::Working,
        format!("Executing Google Search for {target}..."),
    );
    crew.update("o2", AgentStatus::Idle, "Awaiting deep-dive research.");
    crew.update("o3", AgentStatus::Idle, "Awaiting draft.");
    print_crew(&crew);

    let research = async {
        tokio::time::sleep(RESEARCH_PHASE).await;
        crew.update(
            "o1",
            AgentStatus::Completed,
            "Web analysis and local reputation indexed.",
        );
        crew.update(
            "o2",
            AgentStatus::Working,
            "Synthesizing personalized B2B outreach...",
        );
        print_crew(&crew);
    };
    let (result, ()) = tokio::join!(
        gateway.generate_outreach_email(company, city, website, instructions),
        research
    );

    let email = match result {
        Ok(email) => email,
        Err(e) => {
            crew.update_all(AgentStatus::Error, "Crew pipeline halted. Check API status.");
            print_crew(&crew);
            return Err(anyhow::anyhow!(
                "outreach crew failed to draft an email for {company}: {e}"
            ));
        }
    };

    crew.update("o2", AgentStatus::Completed, "Invitational copy finalized.");
    crew.update(
        "o3",
        AgentStatus::Working,
        "Performing final compliance audit...",
    );
    print_crew(&crew);

    tokio::time::sleep(COMPLIANCE_PHASE).await;
    crew.update(
        "o3",
        AgentStatus::Completed,
        "Invitation approved for secure dispatch.",
    );
    print_crew(&crew);

    if html {
        println!("{}", render_email_html(&email, company));
    } else {
        println!("\nSubject: {}\n\n{}", email.subject, email.body);
    }
    Ok(())
}

pub(crate) fn print_crew(crew: &AgentCrew) {
    println!("{}", render_crew(crew));
}

pub(crate) fn render_crew(crew: &AgentCrew) -> String {
    crew.tasks()
        .iter()
        .map(|task| {
            format!(
                "[{:<9}] {:<20} {}",
                task.status.to_string(),
                task.agent_name,
                task.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
