//! A scripted transport for testing.

use super::{PersonTransport, TransportError};
use crate::model::{Person, PersonFields, PersonId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub enum MockRequest {
    List,
    Get(PersonId),
    Create(PersonFields),
    Update(Person),
    Delete(PersonId),
}

#[derive(Debug)]
enum Reply {
    List(Result<Vec<Person>, TransportError>),
    Get(Result<Person, TransportError>),
    Create(Result<Person, TransportError>),
    Update(Result<Person, TransportError>),
    Delete(Result<(), TransportError>),
}

/// A transport that answers from a queue of scripted replies and records every request.
///
/// Replies are consumed in order. A request with no scripted reply, or whose next reply was
/// scripted for a different operation, fails with a `Network` error and leaves the queue
/// as it was.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<MockRequest>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_list(&self, reply: Result<Vec<Person>, TransportError>) -> &Self {
        self.push(Reply::List(reply))
    }

    pub fn reply_get(&self, reply: Result<Person, TransportError>) -> &Self {
        self.push(Reply::Get(reply))
    }

    pub fn reply_create(&self, reply: Result<Person, TransportError>) -> &Self {
        self.push(Reply::Create(reply))
    }

    pub fn reply_update(&self, reply: Result<Person, TransportError>) -> &Self {
        self.push(Reply::Update(reply))
    }

    pub fn reply_delete(&self, reply: Result<(), TransportError>) -> &Self {
        self.push(Reply::Delete(reply))
    }

    fn push(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Panics if scripted replies were left unused.
    pub fn verify(&self) {
        let remaining = self.replies.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all scripted replies were used. {remaining} remaining");
        }
    }

    /// Takes the front reply if `pick` accepts it, otherwise puts it back.
    fn next<R>(
        &self,
        request: MockRequest,
        name: &str,
        pick: impl FnOnce(Reply) -> Result<Result<R, TransportError>, Reply>,
    ) -> Result<R, TransportError> {
        self.requests.lock().unwrap().push(request);
        let mut replies = self.replies.lock().unwrap();
        let Some(reply) = replies.pop_front() else {
            return Err(unexpected(name, None));
        };
        match pick(reply) {
            Ok(result) => result,
            Err(reply) => {
                let err = unexpected(name, Some(&reply));
                replies.push_front(reply);
                Err(err)
            }
        }
    }
}

fn unexpected(request: &str, next: Option<&Reply>) -> TransportError {
    TransportError::Network(format!("mock: no scripted reply for {request}, next was {next:?}"))
}

#[async_trait]
impl PersonTransport for MockTransport {
    async fn list(&self) -> Result<Vec<Person>, TransportError> {
        self.next(MockRequest::List, "list", |reply| match reply {
            Reply::List(result) => Ok(result),
            other => Err(other),
        })
    }

    async fn get(&self, id: PersonId) -> Result<Person, TransportError> {
        self.next(MockRequest::Get(id), "get", |reply| match reply {
            Reply::Get(result) => Ok(result),
            other => Err(other),
        })
    }

    async fn create(&self, fields: &PersonFields) -> Result<Person, TransportError> {
        self.next(MockRequest::Create(fields.clone()), "create", |reply| match reply {
            Reply::Create(result) => Ok(result),
            other => Err(other),
        })
    }

    async fn update(&self, person: &Person) -> Result<Person, TransportError> {
        self.next(MockRequest::Update(person.clone()), "update", |reply| match reply {
            Reply::Update(result) => Ok(result),
            other => Err(other),
        })
    }

    async fn delete(&self, id: PersonId) -> Result<(), TransportError> {
        self.next(MockRequest::Delete(id), "delete", |reply| match reply {
            Reply::Delete(result) => Ok(result),
            other => Err(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let transport = MockTransport::new();
        transport
            .reply_list(Ok(vec![]))
            .reply_delete(Err(TransportError::Network("down".into())));

        assert!(transport.list().await.unwrap().is_empty());
        assert!(transport.delete(PersonId(1)).await.is_err());
        assert_eq!(
            transport.requests(),
            vec![MockRequest::List, MockRequest::Delete(PersonId(1))]
        );
        transport.verify();
    }

    #[tokio::test]
    async fn unscripted_requests_fail() {
        let transport = MockTransport::new();
        assert!(matches!(
            transport.get(PersonId(2)).await,
            Err(TransportError::Network(_))
        ));
    }

    #[tokio::test]
    async fn misordered_request_keeps_the_reply_queued() {
        let transport = MockTransport::new();
        transport.reply_delete(Ok(())).reply_list(Ok(vec![]));

        assert!(matches!(
            transport.list().await,
            Err(TransportError::Network(_))
        ));
        assert!(transport.delete(PersonId(3)).await.is_ok());
        assert!(transport.list().await.unwrap().is_empty());
        transport.verify();
    }
}
