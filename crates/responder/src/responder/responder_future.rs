// Copyright 2015-2021 Benjamin Fry <benjaminfry@me.com>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// https://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// https://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::FutureExt;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::authority::{MessageRequest, MessageResponse, RecordStore, ServiceIndex};
use crate::config::ResponderConfig;
use crate::error::Error;
use crate::proto::op::Header;
use crate::proto::{current_time_millis, ProtoError};
use crate::responder::{Responder, ResponseHandler, ResponseInfo};

/// A Futures based implementation of an mDNS query responder
pub struct ResponderFuture<S: RecordStore, I: ServiceIndex, R: ResponseHandler> {
    store: Arc<S>,
    services: Arc<I>,
    config: Arc<ResponderConfig>,
    handler: R,
    join_set: JoinSet<Result<(), Error>>,
    shutdown_token: CancellationToken,
    rng: SmallRng,
}

impl<S: RecordStore, I: ServiceIndex, R: ResponseHandler> ResponderFuture<S, I, R> {
    /// Creates a new ResponderFuture answering from the shared stores
    /// through `handler`, with the default configuration.
    pub fn new(store: Arc<S>, services: Arc<I>, handler: R) -> Self {
        Self::with_config(store, services, handler, ResponderConfig::default())
    }

    /// Creates a new ResponderFuture with the specified configuration
    pub fn with_config(
        store: Arc<S>,
        services: Arc<I>,
        handler: R,
        config: ResponderConfig,
    ) -> Self {
        Self {
            store,
            services,
            config: Arc::new(config),
            handler,
            join_set: JoinSet::new(),
            shutdown_token: CancellationToken::new(),
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Schedule the answering task for one inbound query.
    ///
    /// The collision-avoidance delay is decided here, synchronously. Once
    /// scheduled a task cannot be recalled, though a shutdown that happens
    /// before its deadline makes it fall through without sending anything.
    pub fn handle_query(&mut self, request: MessageRequest) {
        if self.shutdown_token.is_cancelled() {
            debug!(id = request.id(), "shutting down, dropping query");
            return;
        }

        let responder = Responder::new(
            request,
            self.store.clone(),
            self.services.clone(),
            self.config.clone(),
        );
        let delay = responder.response_delay(current_time_millis(), &mut self.rng);
        debug!(id = responder.request().id(), delay, "scheduling response");

        let shutdown = self.shutdown_token.clone();
        let mut handler = ReportingResponseHandler {
            request_header: *responder.request().header(),
            src: responder.request().src(),
            handler: self.handler.clone(),
        };

        self.join_set.spawn(async move {
            sleep(Duration::from_millis(delay)).await;

            if shutdown.is_cancelled() {
                debug!(
                    id = responder.request().id(),
                    "shutting down, dropping scheduled response",
                );
                return Ok(());
            }

            match responder.execute(current_time_millis(), &mut handler).await {
                Ok(_) => Ok(()),
                Err(error) => {
                    error!(
                        %error,
                        id = responder.request().id(),
                        src = %responder.request().src(),
                        "failed to respond, shutting down",
                    );
                    shutdown.cancel();
                    Err(error)
                }
            }
        });

        reap_tasks(&mut self.join_set);
    }

    /// Triggers a graceful shutdown of the responder. Scheduled tasks stop
    /// answering and the returned future will complete once all of them
    /// have terminated.
    pub async fn shutdown_gracefully(&mut self) -> Result<(), Error> {
        self.shutdown_token.cancel();

        // Wait for the tasks to complete.
        block_until_done(&mut self.join_set).await
    }

    /// This will run until all scheduled tasks complete. If one or more tasks
    /// return an error, one will be chosen as the returned error for this future.
    pub async fn block_until_done(&mut self) -> Result<(), Error> {
        block_until_done(&mut self.join_set).await
    }
}

async fn block_until_done(join_set: &mut JoinSet<Result<(), Error>>) -> Result<(), Error> {
    if join_set.is_empty() {
        warn!("block_until_done called with no pending tasks");
        return Ok(());
    }

    // Now wait for all of the tasks to complete.
    let mut out = Ok(());
    while let Some(join_result) = join_set.join_next().await {
        match join_result {
            Ok(result) => {
                match result {
                    Ok(_) => (),
                    Err(e) => {
                        // Save the last error.
                        out = Err(e);
                    }
                }
            }
            Err(e) => {
                return Err(Error::from(ProtoError::from(format!(
                    "internal error in spawn: {e}"
                ))))
            }
        }
    }
    out
}

/// Reap finished tasks from a `JoinSet`, without awaiting or blocking.
fn reap_tasks(join_set: &mut JoinSet<Result<(), Error>>) {
    while FutureExt::now_or_never(join_set.join_next())
        .flatten()
        .is_some()
    {}
}

#[derive(Clone)]
struct ReportingResponseHandler<R: ResponseHandler> {
    request_header: Header,
    src: SocketAddr,
    handler: R,
}

#[async_trait::async_trait]
#[allow(clippy::uninlined_format_args)]
impl<R: ResponseHandler> ResponseHandler for ReportingResponseHandler<R> {
    async fn send_response(&mut self, response: MessageResponse) -> io::Result<ResponseInfo> {
        let response_info = self.handler.send_response(response).await?;

        let id = self.request_header.id();
        let rid = response_info.id();
        if id != rid {
            warn!("request id:{id} does not match response id:{rid}");
            debug_assert_eq!(id, rid, "request id and response id should match");
        }

        info!("request:{id} src:udp://{addr}#{port} qflags:{qflags} response rr:{answers}/{authorities}/{additionals} rflags:{rflags}",
            id = rid,
            addr = self.src.ip(),
            port = self.src.port(),
            qflags = self.request_header.flags(),
            answers = response_info.answer_count(),
            authorities = response_info.name_server_count(),
            additionals = response_info.additional_count(),
            rflags = response_info.flags(),
        );

        Ok(response_info)
    }
}
