use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use relay_agent_sdk::agent::{
    transfer_to, Agent, ConfirmationAgent, MedInfoAgent, SymptomAgent, SYMPTOM_AGENT,
};
use relay_agent_sdk::connection::RecordingConnection;
use relay_agent_sdk::core::{FrameworkError, SessionEvent};
use relay_agent_sdk::history::Role;
use relay_agent_sdk::llm::{GeneratedTurn, ScriptedGenerator};
use relay_agent_sdk::models::{IntakeData, Patient};
use relay_agent_sdk::prompts::{PromptRenderer, YamlPromptLoader};
use relay_agent_sdk::session::{
    drain_events, AgentRegistry, IntakeSession, IntakeStorage, SessionConfig, SessionState,
};
use relay_agent_sdk::tools::ToolCall;

struct Fixture {
    session: IntakeSession,
    generator: Arc<ScriptedGenerator>,
    connection: Arc<RecordingConnection>,
    renderer: Arc<YamlPromptLoader>,
    storage_dir: TempDir,
    _prompts_dir: TempDir,
}

fn write_prompts() -> TempDir {
    let dir = TempDir::new().unwrap();
    let agents = dir.path().join("agents");
    std::fs::create_dir_all(&agents).unwrap();
    std::fs::write(agents.join("symptom.yaml"), "instructions: Collect symptoms.\n").unwrap();
    std::fs::write(
        agents.join("med_info.yaml"),
        "instructions: |\n  Collect history.\n  {context}\n",
    )
    .unwrap();
    std::fs::write(
        agents.join("confirmation.yaml"),
        "instructions: |\n  Confirm.\n  {context}\n",
    )
    .unwrap();
    dir
}

fn fixture(turns: Vec<GeneratedTurn>) -> Fixture {
    let prompts_dir = write_prompts();
    let storage_dir = TempDir::new().unwrap();
    let renderer = Arc::new(YamlPromptLoader::new(prompts_dir.path()));

    let data = IntakeData::for_patient(
        Patient::new("John Doe", 30)
            .with_gender("male")
            .with_location("New York", "NY", "USA"),
    );

    let mut symptom = SymptomAgent::new();
    symptom.set_data(&data, renderer.as_ref());

    let agents = AgentRegistry::new()
        .with(symptom)
        .unwrap()
        .with(MedInfoAgent::new())
        .unwrap()
        .with(ConfirmationAgent::new())
        .unwrap();

    let connection = Arc::new(RecordingConnection::new());
    let state = SessionState::new(agents, data)
        .with_session_id("intake-1")
        .with_connection(connection.clone());

    let generator = Arc::new(ScriptedGenerator::new(turns));
    let config = SessionConfig::new()
        .with_prompts_dir(prompts_dir.path())
        .with_storage_dir(storage_dir.path());

    let session =
        IntakeSession::new(state, generator.clone(), renderer.clone(), config).unwrap();

    Fixture {
        session,
        generator,
        connection,
        renderer,
        storage_dir,
        _prompts_dir: prompts_dir,
    }
}

fn tool(id: &str, name: &str, arguments: serde_json::Value) -> GeneratedTurn {
    GeneratedTurn::tool(ToolCall::with_id(id, name, arguments))
}

fn full_script() -> Vec<GeneratedTurn> {
    vec![
        GeneratedTurn::text("Hello John, what brings you in today?"),
        tool(
            "c1",
            "update_symptom_form",
            json!({ "form": {
                "chief_complaint": "headache",
                "symptoms": [{ "name": "headache", "sites": ["forehead"], "onset": "gradual" }]
            }}),
        ),
        tool("c2", "finish_symptom_collection", json!({})),
        GeneratedTurn::text("Do you have any past medical conditions?"),
        tool(
            "c3",
            "update_med_info_form",
            json!({ "form": {
                "past_medical_history": ["asthma"],
                "medications": ["albuterol"],
                "allergies": [{ "cause": "penicillin", "symptom": "rash", "severity": "mild" }]
            }}),
        ),
        tool("c4", "finish_med_info_collection", json!({})),
        GeneratedTurn::text("Here is what I have. Is that correct?"),
        tool("c5", "confirm", json!({})),
    ]
}

fn ids(agent: &dyn Agent) -> Vec<String> {
    agent
        .chat_ctx()
        .items()
        .iter()
        .map(|item| item.id.clone())
        .collect()
}

#[tokio::test]
async fn test_full_intake_flow() {
    let mut f = fixture(full_script());
    let mut events = f.session.subscribe();

    f.session.start(SYMPTOM_AGENT).await.unwrap();
    f.session.user_input("I've had a headache for two days").await.unwrap();

    assert_eq!(f.session.active_agent(), Some("med_info"));
    assert_eq!(f.session.state().previous_agent.as_deref(), Some("symptom"));

    f.session
        .user_input("I have asthma and take albuterol. Penicillin gives me a rash.")
        .await
        .unwrap();
    assert_eq!(f.session.active_agent(), Some("confirmation"));

    f.session.user_input("Yes, that's right").await.unwrap();
    assert!(f.session.is_completed());
    assert_eq!(f.generator.remaining(), 0);

    // Collected data
    let data = &f.session.state().data;
    assert_eq!(data.symptom_form.chief_complaint, "headache");
    assert_eq!(data.med_info_form.allergies[0].cause, "penicillin");

    // Participant tagging follows each activation
    assert_eq!(
        f.connection.values_for("agent"),
        vec!["symptom", "med_info", "confirmation"]
    );
    assert_eq!(f.session.visited(), &["symptom", "med_info", "confirmation"]);

    // Opening replies after a handoff are not interruptible
    let requests = f.generator.requests();
    assert_eq!(requests.len(), 8);
    assert_eq!(requests[3].agent, "med_info");
    assert!(!requests[3].allow_interruptions);
    assert!(requests[3].instructions.contains("\"chief_complaint\": \"headache\""));
    assert!(requests[3].instructions.contains("\"name\": \"John Doe\""));
    assert!(!requests[3].instructions.contains("med_info_form"));
    assert_eq!(requests[6].agent, "confirmation");
    assert!(requests[6].instructions.contains("\"medications\": ["));
    assert_eq!(requests[0].instructions, "Collect symptoms.");

    // The med info agent opened with the symptom conversation in context
    let opening_history = &requests[3].history;
    assert!(opening_history
        .iter()
        .any(|item| item.text() == Some("I've had a headache for two days")));
    assert!(opening_history.iter().any(|item| item.text()
        == Some("Thank you for providing the information. Let's talk about your medical history.")));

    // No item appears twice in any agent's history
    for name in ["symptom", "med_info", "confirmation"] {
        let agent_ids = ids(f.session.state().agents.get(name).unwrap());
        let unique: HashSet<_> = agent_ids.iter().collect();
        assert_eq!(unique.len(), agent_ids.len(), "duplicates in {}", name);
    }

    // Confirmation history never starts with a tool fragment
    let confirmation = f.session.state().agents.get("confirmation").unwrap();
    assert!(!confirmation.chat_ctx().items()[0].is_function_item());

    // Persisted record and transcript
    let storage = IntakeStorage::new(f.storage_dir.path());
    assert_eq!(storage.list_records().unwrap(), vec!["intake-1"]);
    let record = storage.load_record("intake-1").unwrap();
    assert_eq!(record.final_agent, "confirmation");
    assert_eq!(record.data.patient.city, "New York");
    assert_eq!(record.data.med_info_form.medications, vec!["albuterol"]);
    let transcript = storage.load_transcript("intake-1").unwrap();
    let last = transcript.last().unwrap();
    assert_eq!(last.role(), Some(Role::Assistant));
    assert!(last.text().unwrap().starts_with("Thank you for providing the information. You medical provider"));

    // Event stream
    let events = drain_events(&mut events);
    let transfers: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Transferred { from, to } => Some((from.as_str(), to.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(transfers, vec![("symptom", "med_info"), ("med_info", "confirmation")]);
    assert!(matches!(events.last(), Some(SessionEvent::Completed { session_id }) if session_id == "intake-1"));

    // Completed sessions take no more input
    let err = f.session.user_input("one more thing").await.unwrap_err();
    assert!(matches!(err, FrameworkError::SessionCompleted(_)));
}

#[tokio::test]
async fn test_transfer_to_unregistered_agent() {
    let mut f = fixture(vec![GeneratedTurn::text("Hello")]);
    f.session.start(SYMPTOM_AGENT).await.unwrap();
    f.session.state_mut().previous_agent = Some("confirmation".to_string());

    let renderer = f.renderer.clone();
    let err = transfer_to(
        f.session.state_mut(),
        "nonexistent",
        "symptom",
        renderer.as_ref(),
    )
    .err()
    .unwrap();

    assert!(matches!(err, FrameworkError::UnknownAgent(ref name) if name == "nonexistent"));
    assert_eq!(
        f.session.state().previous_agent.as_deref(),
        Some("confirmation")
    );
}

#[tokio::test]
async fn test_transfer_without_activation() {
    let mut f = fixture(vec![GeneratedTurn::text("Hello")]);
    f.session.start(SYMPTOM_AGENT).await.unwrap();
    f.session.user_input("My back hurts").await.unwrap();

    let before: Vec<_> = ["symptom", "med_info", "confirmation"]
        .iter()
        .map(|name| ids(f.session.state().agents.get(name).unwrap()))
        .collect();

    let renderer = f.renderer.clone();
    transfer_to(f.session.state_mut(), "med_info", "symptom", renderer.as_ref()).unwrap();

    let after: Vec<_> = ["symptom", "med_info", "confirmation"]
        .iter()
        .map(|name| ids(f.session.state().agents.get(name).unwrap()))
        .collect();

    assert_eq!(before, after);
    assert_eq!(f.session.state().previous_agent.as_deref(), Some("symptom"));
    assert_eq!(f.session.active_agent(), Some("symptom"));
}

#[tokio::test]
async fn test_start_at_later_agent_has_instructions() {
    let mut f = fixture(vec![GeneratedTurn::text("Let's go over your history.")]);

    f.session.start("med_info").await.unwrap();

    let requests = f.generator.requests();
    assert!(requests[0].instructions.starts_with("Collect history."));
    assert!(requests[0].instructions.contains("\"name\": \"John Doe\""));
    assert_eq!(f.connection.values_for("agent"), vec!["med_info"]);
}

#[test]
fn test_bundled_prompts_render() {
    let loader = YamlPromptLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/prompts"));

    let symptom = loader.render("agents/symptom.yaml", "");
    assert!(symptom.contains("update_symptom_form"));

    for template in ["agents/med_info.yaml", "agents/confirmation.yaml"] {
        let rendered = loader.render(template, "{\"patient\": {}}");
        assert!(rendered.contains("{\"patient\": {}}"), "{}", template);
        assert!(!rendered.contains("{context}"), "{}", template);
    }
}
