use std::sync::Arc;

use relay_agent_sdk::agent::{ConfirmationAgent, MedInfoAgent, SymptomAgent, SYMPTOM_AGENT};
use relay_agent_sdk::agent::Agent;
use relay_agent_sdk::cli::{Console, OperatorGenerator};
use relay_agent_sdk::connection::NoopConnection;
use relay_agent_sdk::logging::{self, LoggingConfig};
use relay_agent_sdk::models::{IntakeData, Patient};
use relay_agent_sdk::prompts::YamlPromptLoader;
use relay_agent_sdk::session::{
    drain_events, AgentRegistry, IntakeSession, SessionConfig, SessionState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = logging::init_logging(&LoggingConfig::from_env())?;

    tracing::info!("=== Intake Starting ===");

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::from_file(path)?,
        None => SessionConfig::from_env()?,
    };
    let renderer = Arc::new(YamlPromptLoader::new(&config.prompts_dir));

    let patient = Patient::new("John Doe", 30)
        .with_gender("male")
        .with_location("New York", "NY", "USA");
    let data = IntakeData::for_patient(patient);

    let mut symptom = SymptomAgent::new();
    symptom.set_data(&data, renderer.as_ref());

    let agents = AgentRegistry::new()
        .with(symptom)?
        .with(MedInfoAgent::new())?
        .with(ConfirmationAgent::new())?;
    tracing::info!("Registered {} agents", agents.len());

    let state = SessionState::new(agents, data).with_connection(Arc::new(NoopConnection));
    let mut session = IntakeSession::new(
        state,
        Arc::new(OperatorGenerator::new()),
        renderer,
        config,
    )?;
    let mut events = session.subscribe();

    let console = Console::new();
    console.print_banner(session.session_id());

    let started = session.start(SYMPTOM_AGENT).await;
    for event in drain_events(&mut events) {
        console.print_event(&event);
    }
    started?;

    while !session.is_completed() {
        let input = console.read_input()?;
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        console.print_user(&input);
        let result = session.user_input(&input).await;
        for event in drain_events(&mut events) {
            console.print_event(&event);
        }
        if let Err(e) = result {
            if e.is_configuration() {
                return Err(e.into());
            }
        }
    }

    console.print_summary(&session.state().data);
    tracing::info!("=== Intake Shutting Down ===");

    Ok(())
}
