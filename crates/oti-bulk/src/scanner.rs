//! The bulk cache-or-scan loop.

use oti_client::Gateway;
use oti_core::{codes, Operation};
use serde_json::Value;
use std::collections::VecDeque;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::artifacts::{Category, RunDirectory};
use crate::batch::{BatchCounters, BatchResult, BatchState, ScanCounters, ScanTarget};
use crate::config::BulkScanConfig;
use crate::error::{BulkError, BulkResult};
use crate::normalize::{split_host, UrlNormalizer};
use crate::outcome::{classify, splice_threat, verdict_of, LookupOutcome, Phase};
use crate::progress::{NoProgress, ProgressReporter};

/// Looks up a batch of URLs and polls the ones that need a live scan.
///
/// Targets are processed one at a time, in input order. The first quota or
/// fatal response, or any gateway failure, ends the batch with the counts
/// gathered so far.
pub struct BulkScanner<G> {
    gateway: G,
    config: BulkScanConfig,
    normalizer: UrlNormalizer,
    progress: Arc<dyn ProgressReporter>,
}

impl<G: Gateway> BulkScanner<G> {
    /// Create a scanner sending requests through `gateway`
    pub fn new(gateway: G, config: BulkScanConfig) -> Self {
        Self {
            gateway,
            config,
            normalizer: UrlNormalizer::default(),
            progress: Arc::new(NoProgress),
        }
    }

    /// Report progress to `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Use a custom normalizer for the host-reputation fallback
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: UrlNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Scan settings
    #[must_use]
    pub const fn config(&self) -> &BulkScanConfig {
        &self.config
    }

    /// Scan `lines`, writing artifacts to a new run directory under `output_dir`
    pub async fn run<I>(&self, lines: I, output_dir: &Path) -> BatchResult
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.run_until(lines, output_dir, std::future::pending::<()>())
            .await
    }

    /// Like [`run`](Self::run), stopping early when `shutdown` completes.
    ///
    /// An interrupted batch ends in [`BatchState::Success`] with
    /// `interrupted` set and the counts gathered so far.
    pub async fn run_until<I, F>(&self, lines: I, output_dir: &Path, shutdown: F) -> BatchResult
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: Future,
    {
        let targets = ScanTarget::from_lines(lines);
        self.run_targets(targets, None, output_dir, shutdown).await
    }

    /// Scan the newline-separated URLs in `input`
    pub async fn run_file(&self, input: &Path, output_dir: &Path) -> BatchResult {
        self.run_file_until(input, output_dir, std::future::pending::<()>())
            .await
    }

    /// Like [`run_file`](Self::run_file), stopping early when `shutdown` completes
    pub async fn run_file_until<F: Future>(
        &self,
        input: &Path,
        output_dir: &Path,
        shutdown: F,
    ) -> BatchResult {
        if !output_dir.is_dir() {
            return self.fail(&BulkError::bad_output_dir());
        }
        let text = match read_input(input) {
            Ok(text) => text,
            Err(err) => return self.fail(&err),
        };

        let targets = ScanTarget::from_lines(text.lines());
        self.run_targets(targets, Some(input.to_path_buf()), output_dir, shutdown)
            .await
    }

    async fn run_targets<F: Future>(
        &self,
        targets: Vec<ScanTarget>,
        input: Option<PathBuf>,
        output_dir: &Path,
        shutdown: F,
    ) -> BatchResult {
        let dir = match RunDirectory::create(output_dir) {
            Ok(dir) => dir,
            Err(err) => return self.fail(&err),
        };
        info!(
            targets = targets.len(),
            run_dir = %dir.path().display(),
            "Starting bulk scan"
        );

        let mut run = BatchRun::new(dir);
        let driven = {
            let drive = self.drive(&mut run, targets);
            tokio::select! {
                outcome = drive => Some(outcome),
                _ = shutdown => None,
            }
        };

        let mut result = run.finish(driven);
        result.input = input;
        match &result.state {
            BatchState::Success if result.interrupted => {
                warn!(total = result.total(), "Bulk scan interrupted");
            }
            BatchState::Success if result.pending() > 0 => {
                warn!(
                    pending = result.pending(),
                    "Retries exhausted with live scans still pending"
                );
            }
            BatchState::Success => info!(total = result.total(), "Bulk scan completed"),
            BatchState::Quota => warn!(total = result.total(), "Bulk scan stopped: quota exceeded"),
            BatchState::Failed(reason) => error!(%reason, "Bulk scan aborted"),
        }
        self.progress.on_finish(&result);
        result
    }

    /// Lookup pass followed by up to `retries` poll rounds
    async fn drive(&self, run: &mut BatchRun, targets: Vec<ScanTarget>) -> BulkResult<()> {
        self.progress.on_start(Phase::Lookup, targets.len());

        let mut pending = Vec::new();
        for target in targets {
            let outcome = self.process(run, Phase::Lookup, &target).await?;
            self.progress
                .on_target(Phase::Lookup, &target, &outcome, &run.counters);
            if outcome == LookupOutcome::SubmittedForScan {
                pending.push(target);
            }
        }

        if pending.is_empty() {
            return Ok(());
        }
        let queued = pending.len() as u64;
        run.counters.scan = Some(ScanCounters {
            total: queued,
            pending: queued,
            ..ScanCounters::default()
        });
        info!(pending = pending.len(), "Lookup finished, polling live scans");

        for round in 0..self.config.retries {
            self.progress
                .on_wait(round, self.config.poll_interval, pending.len());
            debug!(round, interval = ?self.config.poll_interval, "Waiting for live scans");
            tokio::time::sleep(self.config.poll_interval).await;

            let phase = Phase::Poll { round };
            self.progress.on_start(phase, pending.len());

            let mut queue = VecDeque::from(pending);
            let mut carried = Vec::new();
            while let Some(target) = queue.front() {
                let outcome = self.process(run, phase, target).await?;
                let Some(target) = queue.pop_front() else {
                    break;
                };
                let still_pending = outcome == LookupOutcome::SubmittedForScan;
                if let Some(scan) = run.counters.scan.as_mut() {
                    scan.pending = (queue.len() + carried.len() + usize::from(still_pending)) as u64;
                }
                self.progress.on_target(phase, &target, &outcome, &run.counters);
                if still_pending {
                    carried.push(target);
                }
            }

            if carried.is_empty() {
                info!(round, "All live scans resolved");
                return Ok(());
            }
            info!(round, pending = carried.len(), "Live scans still pending");
            pending = carried;
        }

        Ok(())
    }

    /// Query one target, classify the response and record it
    async fn process(
        &self,
        run: &mut BatchRun,
        phase: Phase,
        target: &ScanTarget,
    ) -> BulkResult<LookupOutcome> {
        debug!(%phase, line = target.line, url = target.url(), "Querying URL");
        let mut response = self
            .gateway
            .request(Operation::UrlScan, &[("url", target.url())])
            .await
            .map_err(|e| {
                error!(%phase, url = target.url(), error = %e, "Gateway request failed");
                BulkError::Transport(e)
            })?;

        let mut outcome = classify(&response, &self.config);
        match &outcome {
            LookupOutcome::QuotaExceeded { code } => {
                return Err(BulkError::QuotaExceeded { code: *code });
            }
            LookupOutcome::FatalError { code, message } => {
                return Err(BulkError::Fatal {
                    code: *code,
                    message: message.clone(),
                });
            }
            LookupOutcome::CacheHitBenign => {
                if let Some(threat) = self.malicious_host_threat(target).await? {
                    debug!(url = target.url(), "Host reputation overrides URL verdict");
                    splice_threat(&mut response, threat);
                    outcome = LookupOutcome::CacheHitMalicious;
                }
            }
            LookupOutcome::ApiError(message) => {
                warn!(%phase, url = target.url(), %message, "Unexpected API response");
            }
            _ => {}
        }

        run.record(phase, target, &outcome, response)?;
        Ok(outcome)
    }

    /// Look up the target's host; returns its `threatData` when the host is
    /// known malicious.
    ///
    /// Only quota and fatal codes are errors here. Any other failure leaves
    /// the URL's own verdict in place.
    async fn malicious_host_threat(&self, target: &ScanTarget) -> BulkResult<Option<Value>> {
        let Some(host) = self
            .normalizer
            .normalize(target.url(), &self.config.default_scheme)
            .and_then(|url| split_host(&url))
            .map(|split| split.host)
        else {
            warn!(url = target.url(), "No host to check; keeping URL verdict");
            return Ok(None);
        };

        let reply = match self
            .gateway
            .request(Operation::HostReputation, &[("host", host.as_str())])
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%host, error = %e, "Host reputation lookup failed; keeping URL verdict");
                return Ok(None);
            }
        };

        match codes::error_no(&reply) {
            Some(codes::SUCCESS) => {
                let threat = &reply["threatData"];
                Ok(verdict_of(threat).is_malicious().then(|| threat.clone()))
            }
            Some(code) if self.config.is_quota(code) => Err(BulkError::QuotaExceeded { code }),
            Some(code) if self.config.is_fatal(code) => Err(BulkError::Fatal {
                code,
                message: codes::status_of(&reply),
            }),
            _ => {
                warn!(%host, status = %codes::status_of(&reply), "Host reputation lookup not served");
                Ok(None)
            }
        }
    }

    fn fail(&self, err: &BulkError) -> BatchResult {
        error!(error = %err, "Bulk scan not started");
        let result = BatchResult::failed(err);
        self.progress.on_finish(&result);
        result
    }
}

/// Mutable state of one batch
struct BatchRun {
    dir: RunDirectory,
    counters: BatchCounters,
    responses: Vec<Value>,
}

impl BatchRun {
    fn new(dir: RunDirectory) -> Self {
        Self {
            dir,
            counters: BatchCounters::default(),
            responses: Vec::new(),
        }
    }

    /// Append `outcome` for `target` to the phase's files, then count it.
    /// A target is counted only once all of its artifacts are written.
    /// Called once per target per pass, never for abort outcomes.
    fn record(
        &mut self,
        phase: Phase,
        target: &ScanTarget,
        outcome: &LookupOutcome,
        response: Value,
    ) -> BulkResult<()> {
        self.persist(phase, target.url(), outcome, &response)?;
        self.count(phase, outcome);

        if matches!(
            outcome,
            LookupOutcome::CacheHitMalicious | LookupOutcome::CacheHitBenign
        ) {
            self.responses.push(response);
        }
        Ok(())
    }

    fn persist(
        &self,
        phase: Phase,
        url: &str,
        outcome: &LookupOutcome,
        response: &Value,
    ) -> std::io::Result<()> {
        let dir = &self.dir;

        match phase {
            Phase::Lookup => {
                dir.append_line(Category::Original, url)?;
                match outcome {
                    LookupOutcome::CacheHitMalicious => {
                        dir.append_line(Category::FoundInCache, url)?;
                        dir.append_line(Category::FoundMalicious, url)?;
                        dir.append_json(Category::MaliciousRaw, response)
                    }
                    LookupOutcome::CacheHitBenign => {
                        dir.append_line(Category::FoundInCache, url)?;
                        dir.append_line(Category::FoundBenign, url)?;
                        dir.append_json(Category::BenignRaw, response)
                    }
                    LookupOutcome::Invalid => dir.append_line(Category::FoundInvalid, url),
                    LookupOutcome::SubmittedForScan => {
                        dir.append_line(Category::SubmittedForScan, url)
                    }
                    LookupOutcome::ApiError(message) => append_error(dir, url, message),
                    LookupOutcome::QuotaExceeded { .. } | LookupOutcome::FatalError { .. } => Ok(()),
                }
            }
            Phase::Poll { round } => match outcome {
                LookupOutcome::CacheHitMalicious => {
                    dir.append_line(Category::Scanned, url)?;
                    dir.append_line(Category::ScannedMalicious, url)?;
                    dir.append_json(Category::MaliciousRaw, response)
                }
                LookupOutcome::CacheHitBenign => {
                    dir.append_line(Category::Scanned, url)?;
                    dir.append_line(Category::ScannedBenign, url)?;
                    dir.append_json(Category::BenignRaw, response)
                }
                LookupOutcome::SubmittedForScan => dir.append_line(Category::ScanPending(round), url),
                LookupOutcome::Invalid => append_error(dir, url, &codes::status_of(response)),
                LookupOutcome::ApiError(message) => append_error(dir, url, message),
                LookupOutcome::QuotaExceeded { .. } | LookupOutcome::FatalError { .. } => Ok(()),
            },
        }
    }

    fn count(&mut self, phase: Phase, outcome: &LookupOutcome) {
        match phase {
            Phase::Lookup => {
                let lookup = &mut self.counters.lookup;
                lookup.total += 1;
                match outcome {
                    LookupOutcome::CacheHitMalicious => {
                        lookup.found_in_cache += 1;
                        lookup.malicious += 1;
                    }
                    LookupOutcome::CacheHitBenign => {
                        lookup.found_in_cache += 1;
                        lookup.benign += 1;
                    }
                    LookupOutcome::Invalid => lookup.invalid += 1,
                    LookupOutcome::SubmittedForScan => lookup.submitted_for_scan += 1,
                    LookupOutcome::ApiError(_) => lookup.errors += 1,
                    LookupOutcome::QuotaExceeded { .. } | LookupOutcome::FatalError { .. } => {}
                }
            }
            Phase::Poll { .. } => {
                let scan = self
                    .counters
                    .scan
                    .get_or_insert_with(ScanCounters::default);
                match outcome {
                    LookupOutcome::CacheHitMalicious => {
                        scan.completed += 1;
                        scan.malicious += 1;
                    }
                    LookupOutcome::CacheHitBenign => {
                        scan.completed += 1;
                        scan.benign += 1;
                    }
                    LookupOutcome::Invalid | LookupOutcome::ApiError(_) => scan.errors += 1,
                    LookupOutcome::SubmittedForScan
                    | LookupOutcome::QuotaExceeded { .. }
                    | LookupOutcome::FatalError { .. } => {}
                }
            }
        }
    }

    fn finish(self, driven: Option<BulkResult<()>>) -> BatchResult {
        let (state, interrupted) = match driven {
            Some(Ok(())) => (BatchState::Success, false),
            Some(Err(err)) => (BatchState::from(&err), false),
            None => (BatchState::Success, true),
        };

        BatchResult {
            state,
            counters: self.counters,
            responses: self.responses,
            input: None,
            run_dir: Some(self.dir.path().to_path_buf()),
            interrupted,
        }
    }
}

fn append_error(dir: &RunDirectory, url: &str, message: &str) -> std::io::Result<()> {
    dir.append_line(Category::ScanError, url)?;
    dir.append_line(Category::ScanError, &format!("ERROR: {message}"))
}

/// Read the input file; a missing, empty or non-text file is an input error
fn read_input(input: &Path) -> BulkResult<String> {
    let usable = fs::metadata(input).is_ok_and(|meta| meta.is_file() && meta.len() > 0);
    if !usable {
        return Err(BulkError::empty_input());
    }
    fs::read_to_string(input).map_err(|e| {
        debug!(path = %input.display(), error = %e, "Failed to read input");
        BulkError::empty_input()
    })
}
