use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 假服务端的一次应答
#[derive(Clone, Debug)]
pub enum Reply {
    Json(u16, Value),
    Text(u16, String),
}

impl Reply {
    fn respond(&self) -> HttpResponse {
        match self {
            Reply::Json(status, body) => HttpResponse::build(status_code(*status)).json(body),
            Reply::Text(status, body) => HttpResponse::build(status_code(*status)).body(body.clone()),
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("invalid status code")
}

/// 假服务端状态：可替换的应答 + 请求记录
pub struct Backend {
    pub extract_reply: Mutex<Reply>,
    pub generate_reply: Mutex<Reply>,
    pub extract_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub last_extract_path: Mutex<Option<String>>,
    pub last_extract_body: Mutex<Option<Value>>,
    pub last_generate_body: Mutex<Option<Value>>,
}

#[allow(dead_code)]
impl Backend {
    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn set_generate_reply(&self, reply: Reply) {
        *self.generate_reply.lock().unwrap() = reply;
    }

    pub fn last_generate_body(&self) -> Value {
        self.last_generate_body
            .lock()
            .unwrap()
            .clone()
            .expect("no generate request recorded")
    }

    pub fn last_extract_body(&self) -> Value {
        self.last_extract_body
            .lock()
            .unwrap()
            .clone()
            .expect("no extract request recorded")
    }
}

#[allow(dead_code)]
pub struct TestBackend {
    pub address: String,
    pub state: Arc<Backend>,
}

async fn extract(
    req: actix_web::HttpRequest,
    state: web::Data<Backend>,
    body: web::Json<Value>,
) -> HttpResponse {
    state.extract_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_extract_path.lock().unwrap() = Some(req.path().to_string());
    *state.last_extract_body.lock().unwrap() = Some(body.into_inner());
    let reply = state.extract_reply.lock().unwrap().clone();
    reply.respond()
}

async fn generate(state: web::Data<Backend>, body: web::Json<Value>) -> HttpResponse {
    state.generate_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_generate_body.lock().unwrap() = Some(body.into_inner());
    let reply = state.generate_reply.lock().unwrap().clone();
    reply.respond()
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn run(listener: TcpListener, state: Arc<Backend>) -> Result<Server, std::io::Error> {
    let data = web::Data::from(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().limit(16 * 1024 * 1024))
            .route("/health", web::get().to(health))
            .route("/api/extract-pdf", web::post().to(extract))
            .route("/api/extract-docx", web::post().to(extract))
            .route("/api/generate-quiz", web::post().to(generate))
    })
    .workers(1)
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn spawn_backend(extract_reply: Reply, generate_reply: Reply) -> TestBackend {
    doc_quiz::logger::init();

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let state = Arc::new(Backend {
        extract_reply: Mutex::new(extract_reply),
        generate_reply: Mutex::new(generate_reply),
        extract_calls: AtomicUsize::new(0),
        generate_calls: AtomicUsize::new(0),
        last_extract_path: Mutex::new(None),
        last_extract_body: Mutex::new(None),
        last_generate_body: Mutex::new(None),
    });

    let server = run(listener, state.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestBackend { address, state }
}

/// 两道题的标准测验：选择题答案为 B，判断题答案为 True
#[allow(dead_code)]
pub fn sample_questions() -> Value {
    json!({
        "questions": [
            {
                "type": "multiple_choice",
                "question": "Which letter comes second?",
                "options": ["A", "B", "C"],
                "correctAnswer": 1,
                "explanation": "B follows A."
            },
            {
                "type": "true_false",
                "question": "Rust has a borrow checker.",
                "options": ["True", "False"],
                "correctAnswer": 0
            }
        ]
    })
}

/// 返回一个当前没有监听者的地址
#[allow(dead_code)]
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
