//! Static site copy shared by the server and the chat clients

/// First assistant turn of every fresh transcript
pub const WELCOME_MESSAGE: &str =
    "Hi! I'm Nick's AI assistant. Ask me anything about his experience, skills, or projects.";

/// Suggestion pills offered before the first question
pub const SUGGESTIONS: [&str; 3] = [
    "Why should I hire Nick?",
    "What is Nick best at?",
    "What is Nick's coolest project?",
];

/// Answer substituted when the provider returns no content
pub const NO_RESPONSE: &str = "No response received.";

/// Assistant turn shown when asking fails for any reason
pub const ERROR_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// About / Experience / Contact narrative, in markdown
pub const INTRO_MARKDOWN: &str = "## About Nick

I'm an AI engineer with 5+ years of experience and more than 20 patents. I focus on building reliable, scalable systems that move from prototype to product without losing clarity or purpose. I work on retrieval-augmented generation pipelines, multi-agent systems, and internal AI platforms that help real teams get work done.

I like to learn new tech quickly and apply it to real problems, not just demos. Outside work I'm usually exploring the city, traveling, lifting, or hunting down the best latte in town.

## Experience

**Software Engineer II, OCTO Engineering, Dell Technologies** (2023–Present)
AI systems, distributed services, and internal enablement tools: MLOps pipelines, ONNX Runtime optimization, and agent-style systems that automate complex internal workloads, with a focus on retrieval-augmented generation and multi-agent platforms.

**Software Engineer I, Client CTO Engineering, Dell Technologies** (2021–2023)
On-device intelligence and connected device concepts, from telemetry automation for local model training to early input and design work for the NYX controller and related edge experiences.

### Earlier work

**Software Engineering Intern, Tech Strategy Team, Dell Technologies** (2020)
A touchpad concept with hardware-level video conferencing controls, later shipped in Dell devices.

**Data Science Intern, ThoughtTrace** (2018)
Automated training and validation for document classifiers on oil and gas lease data.

**Peer Teacher, Electrical Engineering, Texas A&M University** (2019)
Taught computer systems fundamentals and supported lab instruction.

## Contact

**Email:** nickrwann@gmail.com
**Location:** Austin, TX";

/// Suggestion by position, as picked from the pills
pub fn suggestion(index: usize) -> Option<&'static str> {
    SUGGESTIONS.get(index).copied()
}
