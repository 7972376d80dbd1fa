use std::{
    path::{Path, PathBuf},
    sync::mpsc,
};

use crate::{
    assets::decode::decode_image_file,
    foundation::error::{ScrollreelError, ScrollreelResult},
    load::fetch::{FetchRequest, FrameFetcher, LoadEvent},
};

/// Reads and decodes frames from disk on a rayon pool.
///
/// Completions are posted to the channel returned by [`FsFetcher::new`] in whatever order the
/// workers finish. Relative frame sources resolve against `root`.
pub struct FsFetcher {
    root: PathBuf,
    pool: rayon::ThreadPool,
    tx: mpsc::Sender<LoadEvent>,
}

impl std::fmt::Debug for FsFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsFetcher")
            .field("root", &self.root)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl FsFetcher {
    pub fn new(
        root: impl Into<PathBuf>,
        threads: Option<usize>,
    ) -> ScrollreelResult<(Self, mpsc::Receiver<LoadEvent>)> {
        let pool = build_thread_pool(threads)?;
        let (tx, rx) = mpsc::channel();
        Ok((
            Self {
                root: root.into(),
                pool,
                tx,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameFetcher for FsFetcher {
    fn fetch(&mut self, request: FetchRequest) {
        let FetchRequest { index, source } = request;
        let path = self.root.join(source);
        let tx = self.tx.clone();
        self.pool.spawn(move || {
            let result = decode_image_file(&path)
                .map_err(|e| ScrollreelError::asset_load(index.0, format!("{e:#}")));
            tracing::debug!(%index, ok = result.is_ok(), "frame fetch finished");
            // The receiver is gone once the animator is dropped; nothing to report to.
            let _ = tx.send(LoadEvent { index, result });
        });
    }
}

fn build_thread_pool(threads: Option<usize>) -> ScrollreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrollreelError::validation(
            "fetch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("scrollreel-fetch-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrollreelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/host/fs_fetcher.rs"]
mod tests;
