//! Sliding-window record of search requests.
//!
//! Time is logical: every recorded request advances the clock by one unit, and
//! a request is forgotten once it is `window` units old.

use crate::search_server::{DocumentPredicate, SearchServer};
use crate::{Document, DocumentStatus};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub time: u64,
    pub result_count: usize,
}

#[derive(Debug, Clone)]
pub struct RequestHistory {
    window: u64,
    current_time: u64,
    requests: VecDeque<QueryResult>,
}

impl RequestHistory {
    pub fn new(window: u64) -> Self {
        Self { window, current_time: 0, requests: VecDeque::new() }
    }

    pub fn window(&self) -> u64 { self.window }

    pub fn current_time(&self) -> u64 { self.current_time }

    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }

    pub fn record(&mut self, result_count: usize) {
        self.current_time += 1;
        self.requests.push_back(QueryResult { time: self.current_time, result_count });
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.time < self.window {
                break;
            }
            self.requests.pop_front();
        }
    }

    pub fn no_result_requests(&self) -> usize {
        self.requests.iter().filter(|r| r.result_count == 0).count()
    }
}

/// Runs searches against a [`SearchServer`] and remembers how many hits each returned.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    history: RequestHistory,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self::with_window(server, server.config().request_window)
    }

    pub fn with_window(server: &'a SearchServer, window: u64) -> Self {
        Self { server, history: RequestHistory::new(window) }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Vec<Document> {
        self.add_find_request_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn add_find_request_with_status(&mut self, raw_query: &str, status: DocumentStatus) -> Vec<Document> {
        let documents = self.server.find_top_documents_with_status(raw_query, status);
        self.history.record(documents.len());
        documents
    }

    pub fn add_find_request_with<P: DocumentPredicate>(&mut self, raw_query: &str, predicate: P) -> Vec<Document> {
        let documents = self.server.find_top_documents_with(raw_query, predicate);
        self.history.record(documents.len());
        documents
    }

    pub fn no_result_requests(&self) -> usize { self.history.no_result_requests() }

    pub fn history(&self) -> &RequestHistory { &self.history }
}
