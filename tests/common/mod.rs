#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use terna::{ClientConfig, HttpReply, Result, TernaClient, Transport};

pub const TOKEN_URL: &str = "https://api.terna.it/transparency/oauth/accessToken";

/// One call seen by the fake transport.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub at: Instant,
}

/// In-memory transport: replays queued replies and records every call.
/// Without queued replies it hands out fresh one-hour tokens and an empty
/// data payload.
#[derive(Debug, Default)]
pub struct FakeTransport {
    pub posts: RefCell<Vec<Recorded>>,
    pub gets: RefCell<Vec<Recorded>>,
    token_replies: RefCell<VecDeque<HttpReply>>,
    data_replies: RefCell<VecDeque<HttpReply>>,
    issued: Cell<usize>,
}

pub fn reply(status: u16, body: &str) -> HttpReply {
    HttpReply {
        status,
        url: String::new(),
        body: body.to_string(),
    }
}

pub fn token_reply(token: &str, expires_in: u64) -> HttpReply {
    reply(
        200,
        &format!(r#"{{"access_token":"{token}","token_type":"Bearer","expires_in":{expires_in}}}"#),
    )
}

impl FakeTransport {
    pub fn with_token(self, reply: HttpReply) -> Self {
        self.token_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn with_data(self, reply: HttpReply) -> Self {
        self.data_replies.borrow_mut().push_back(reply);
        self
    }

    pub fn post_count(&self) -> usize {
        self.posts.borrow().len()
    }

    pub fn get_count(&self) -> usize {
        self.gets.borrow().len()
    }

    pub fn last_get(&self) -> Recorded {
        self.gets.borrow().last().cloned().expect("no GET recorded")
    }
}

impl Transport for FakeTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpReply> {
        self.posts.borrow_mut().push(Recorded {
            url: url.to_string(),
            params: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            bearer: None,
            at: Instant::now(),
        });
        let mut answer = self.token_replies.borrow_mut().pop_front().unwrap_or_else(|| {
            self.issued.set(self.issued.get() + 1);
            token_reply(&format!("token-{}", self.issued.get()), 3600)
        });
        answer.url = url.to_string();
        Ok(answer)
    }

    fn get(&self, url: &str, query: &[(String, String)], bearer: &str) -> Result<HttpReply> {
        self.gets.borrow_mut().push(Recorded {
            url: url.to_string(),
            params: query.to_vec(),
            bearer: Some(bearer.to_string()),
            at: Instant::now(),
        });
        let mut answer = self
            .data_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| reply(200, r#"{"result":{},"data":[]}"#));
        answer.url = url.to_string();
        Ok(answer)
    }
}

/// Client over `transport` with rate limiting switched off.
pub fn fast_client(transport: FakeTransport) -> TernaClient<FakeTransport> {
    let config = ClientConfig::new("my-api-key", "my-api-secret").with_rate_limit(Duration::ZERO);
    TernaClient::with_transport(config, transport).unwrap()
}

pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
