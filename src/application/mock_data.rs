//! Mock 响应数据
//!
//! 提供方不可用或调用失败时返回的样例载荷

use serde_json::json;

use super::answers::Answer;
use super::docs::DocSet;
use super::flowchart::{Flowchart, FlowchartEdge, FlowchartNode};

/// 样例文档集
pub fn mock_doc_set() -> DocSet {
    DocSet {
        version_1: json!(
            "### TL;DR\nExplainify Tasks collects project briefs, audiences, and statuses so the AI writer can plan better. Submit JSON payloads to `/tasks` with a `title`, `role`, and optional `specUrl`. Fetch everything with a GET to `/tasks`.\n\n### Why it matters\nStudents and new teammates see only the fields they need. Everything stays normalized, so the Explainify agent can summarize quickly."
        ),
        version_2: json!(
            "### Endpoints\n- `GET /tasks`\n  - Optional filters: `role`, `status`, `tag` as query params\n  - Returns paginated `{ items: Task[], cursor: string | null }`\n- `POST /tasks`\n  - Body schema: `{ title: string; audience: string; specUrl?: string; status?: 'draft' | 'ready' }`\n  - Idempotency supported through `Idempotency-Key` header\n\n### Auth & headers\nProvide `Authorization: Bearer <token>`. Rate limit is 60 req/min/IP.\n\n### Webhooks\nConfigure webhook targets under `/settings/webhooks` to be notified whenever `status` flips to `ready`."
        ),
        version_3: json!(
            "### Security Researcher focus\n- **Surface area:** Only two public endpoints; both expect HTTPS + JWT.\n- **Input validation:** `title` truncated to 140 chars server-side. `specUrl` validated against RFC 3986 but not fetched automatically.\n- **Threat model tips:** Create a dedicated service account token and rotate monthly. Use `scope=tasks.write` when POSTing and keep GET tokens read-only. Webhook signatures rely on `Explainify-Signature` (HMAC-SHA256)."
        ),
        dialogue_script: json!(
            "Monika: I'm trying to grasp what the Explainify Tasks API actually does.\nVikram: Think of it as an intake form for API briefs—POST creates a work item and GET lets you check everything.\nMonika: So it's minimal on purpose?\nVikram: Exactly. Only the metadata Explainify needs, plus JWT + rate limits to keep it safe.\nMonika: Got it, thanks!"
        ),
    }
}

/// 样例流程图
pub fn mock_flowchart() -> Flowchart {
    Flowchart {
        summary: "Start by understanding the API surface, then create use-case specific payloads, test them, and finally automate roll-outs with monitoring.".to_string(),
        nodes: vec![
            FlowchartNode {
                id: "discover".to_string(),
                title: "Discovery".to_string(),
                description: "Review endpoints, auth, and rate limits for your persona.".to_string(),
                category: Some("foundation".to_string()),
            },
            FlowchartNode {
                id: "model".to_string(),
                title: "Domain Modeling".to_string(),
                description: "Map API objects to your internal models and workflows.".to_string(),
                category: Some("design".to_string()),
            },
            FlowchartNode {
                id: "prototype".to_string(),
                title: "Prototype Requests".to_string(),
                description: "Craft sample requests/responses in a dedicated workspace.".to_string(),
                category: Some("build".to_string()),
            },
            FlowchartNode {
                id: "validate".to_string(),
                title: "Validation & Testing".to_string(),
                description: "Add schema validation, test harnesses, and security checks.".to_string(),
                category: Some("quality".to_string()),
            },
            FlowchartNode {
                id: "deploy".to_string(),
                title: "Automation & Monitoring".to_string(),
                description: "Automate deployments and plug into observability dashboards.".to_string(),
                category: Some("scale".to_string()),
            },
        ],
        edges: vec![
            FlowchartEdge {
                id: None,
                source: "discover".to_string(),
                target: "model".to_string(),
                label: Some("Define data surface".to_string()),
            },
            FlowchartEdge {
                id: None,
                source: "model".to_string(),
                target: "prototype".to_string(),
                label: Some("Implement flows".to_string()),
            },
            FlowchartEdge {
                id: None,
                source: "prototype".to_string(),
                target: "validate".to_string(),
                label: Some("Harden".to_string()),
            },
            FlowchartEdge {
                id: None,
                source: "validate".to_string(),
                target: "deploy".to_string(),
                label: Some("Ship & observe".to_string()),
            },
        ],
    }
}

/// 样例问答
pub fn mock_answer() -> Answer {
    Answer {
        answer: "This API exposes REST endpoints for managing tasks. Authenticate with a bearer token, then call `GET /tasks` to list entries or `POST /tasks` with a JSON body to create new ones.".to_string(),
        follow_ups: vec![
            "How do I paginate or filter the task list?".to_string(),
            "What errors should I handle for rate limits?".to_string(),
            "Can I subscribe to webhook events for task updates?".to_string(),
        ],
    }
}
