use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use super::{FileDownloader, Payload, Response};

pub const DEFAULT_USER_AGENT: &str = "UbuntuImageFetcher/1.0 (Community Project)";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct UreqFetcher {
    agent: Agent,
}

impl FileDownloader for UreqFetcher {
    fn fetch(&self, url: &str) -> Response {
        match self.agent.get(url).call() {
            Ok(response) => {
                let content_type = response.header("Content-Type").map(str::to_string);
                let content_length = response
                    .header("Content-Length")
                    .and_then(|value| value.trim().parse::<u64>().ok());

                Response::ok(Payload::new(
                    content_type,
                    content_length,
                    response.into_reader(),
                ))
            }

            Err(ureq::Error::Status(code, response)) => {
                Response::status(code, response.status_text())
            }

            Err(ureq::Error::Transport(transport)) => Response::network_error(transport),
        }
    }
}

impl UreqFetcher {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .build();

        UreqFetcher { agent }
    }
}

impl Default for UreqFetcher {
    fn default() -> Self {
        Self::new()
    }
}
