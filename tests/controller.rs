//! End-to-end controller scenarios driven through a fake plugin runtime.

use reposcout::app::{RequestKind, TimerQueue};
use reposcout::github::{decode_response, SearchRequest};
use reposcout::ui::ViewStatus;
use reposcout::{handle_event, initialize, Action, AppState, Config, Event, RepositoryItem};

/// Plays the part of main.rs: records timers and in-flight requests.
struct Runtime {
    app: AppState,
    timers: TimerQueue,
    in_flight: Vec<SearchRequest>,
}

impl Runtime {
    fn new() -> Self {
        Self {
            app: initialize(&Config::default()),
            timers: TimerQueue::default(),
            in_flight: Vec::new(),
        }
    }

    fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.app, &event).unwrap();
        assert!(
            !(self.app.search.loading && self.app.search.fetching_more),
            "loading and fetching_more both set after {event:?}"
        );
        for action in actions {
            match action {
                Action::ScheduleDebounce { ticket, .. } => self.timers.push(ticket),
                Action::Search(request) => self.in_flight.push(request),
                Action::CloseFocus => {}
            }
        }
        render
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    /// Elapses every scheduled timer in order.
    fn elapse_timers(&mut self) {
        while let Some(ticket) = self.timers.pop() {
            self.send(Event::DebounceElapsed { ticket });
        }
    }

    fn take_request(&mut self) -> SearchRequest {
        assert!(!self.in_flight.is_empty(), "no request in flight");
        self.in_flight.remove(0)
    }

    fn respond(&mut self, request: &SearchRequest, items: Vec<RepositoryItem>) -> bool {
        self.send(Event::SearchCompleted {
            tag: request.tag.clone(),
            outcome: Ok(items),
        })
    }

    fn fail(&mut self, request: &SearchRequest, message: &str) -> bool {
        self.send(Event::SearchCompleted {
            tag: request.tag.clone(),
            outcome: Err(message.to_string()),
        })
    }

    fn names(&self) -> Vec<&str> {
        self.app
            .search
            .results
            .iter()
            .map(|r| r.full_name.as_str())
            .collect()
    }
}

fn repos(prefix: &str, range: std::ops::Range<u64>) -> Vec<RepositoryItem> {
    range
        .map(|i| RepositoryItem::new(i, format!("{prefix}/repo-{i}")))
        .collect()
}

#[test]
fn rapid_typing_issues_single_request_for_final_text() {
    let mut rt = Runtime::new();
    rt.type_text("react");
    assert_eq!(rt.timers.len(), 5);

    rt.elapse_timers();

    assert_eq!(rt.in_flight.len(), 1);
    let request = rt.take_request();
    assert_eq!(request.query, "react");
    assert_eq!(request.page, 1);
    assert!(rt.app.search.loading);
}

#[test]
fn first_and_second_page_of_results() {
    let mut rt = Runtime::new();
    rt.type_text("react");
    rt.elapse_timers();

    let first = rt.take_request();
    assert!(rt.respond(&first, repos("facebook", 0..10)));
    assert_eq!(rt.app.search.results.len(), 10);
    assert_eq!(rt.app.search.page, 1);
    assert_eq!(rt.app.search.view_status(), ViewStatus::Results { fetching_more: false });

    rt.send(Event::ReachedScrollEnd);
    let second = rt.take_request();
    assert_eq!(second.page, 2);
    assert_eq!(second.tag.kind, RequestKind::NextPage);
    assert!(rt
        .app
        .search
        .results
        .iter()
        .all(|r| r.full_name.starts_with("facebook/")));
    assert_eq!(rt.app.search.view_status(), ViewStatus::Results { fetching_more: true });

    rt.respond(&second, repos("facebook", 10..20));
    assert_eq!(rt.app.search.results.len(), 20);
    assert_eq!(rt.app.search.page, 2);
    assert!(!rt.app.search.fetching_more);
    assert_eq!(rt.names()[0], "facebook/repo-0");
    assert_eq!(rt.names()[19], "facebook/repo-19");
}

#[test]
fn response_for_previous_query_is_discarded() {
    let mut rt = Runtime::new();
    rt.send(Event::SetSearchText("A".into()));
    rt.elapse_timers();
    let stale = rt.take_request();

    rt.send(Event::SetSearchText("B".into()));
    rt.elapse_timers();
    let current = rt.take_request();

    assert!(!rt.respond(&stale, repos("a", 0..3)));
    assert!(rt.app.search.results.is_empty());
    assert!(rt.app.search.loading);

    rt.respond(&current, repos("b", 0..2));
    assert_eq!(rt.names(), vec!["b/repo-0", "b/repo-1"]);
}

#[test]
fn late_next_page_after_query_change_is_discarded() {
    let mut rt = Runtime::new();
    rt.type_text("rust");
    rt.elapse_timers();
    let first = rt.take_request();
    rt.respond(&first, repos("rust", 0..10));

    rt.send(Event::ReachedScrollEnd);
    let more = rt.take_request();

    rt.send(Event::SetSearchText("go".into()));
    assert!(rt.app.search.results.is_empty());
    assert!(!rt.app.search.fetching_more);

    assert!(!rt.respond(&more, repos("rust", 10..20)));
    assert!(rt.app.search.results.is_empty());
    assert_eq!(rt.app.search.page, 1);
}

#[test]
fn scroll_end_is_ignored_while_a_request_is_in_flight() {
    let mut rt = Runtime::new();
    rt.type_text("vue");
    rt.elapse_timers();
    let first = rt.take_request();

    let loading = rt.app.search.clone();
    assert!(loading.loading);
    rt.send(Event::ReachedScrollEnd);
    rt.send(Event::KeyDown);
    assert_eq!(rt.app.search, loading);
    assert!(rt.in_flight.is_empty(), "no next page while loading");

    rt.respond(&first, repos("vuejs", 0..10));
    rt.send(Event::ReachedScrollEnd);
    assert_eq!(rt.in_flight.len(), 1);

    let fetching_more = rt.app.search.clone();
    assert!(fetching_more.fetching_more);
    rt.send(Event::ReachedScrollEnd);
    rt.send(Event::KeyDown);
    assert_eq!(rt.app.search, fetching_more);
    assert_eq!(rt.in_flight.len(), 1, "one next page while fetching more");
}

#[test]
fn first_page_failure_shows_error_banner() {
    let mut rt = Runtime::new();
    rt.type_text("x");
    rt.elapse_timers();
    let request = rt.take_request();

    rt.fail(&request, "GitHub API error (403): API rate limit exceeded");

    assert!(!rt.app.search.loading);
    assert_eq!(
        rt.app.search.view_status(),
        ViewStatus::Error {
            message: "GitHub API error (403): API rate limit exceeded".to_string()
        }
    );

    let vm = rt.app.compute_viewmodel(24, 100);
    let banner = vm.error_banner.expect("banner shown");
    assert_eq!(banner.title, "Something Wrong!");

    rt.type_text("y");
    rt.elapse_timers();
    assert!(rt.app.search.error.is_none(), "a new search clears the error");
}

#[test]
fn next_page_failure_keeps_loaded_results() {
    let mut rt = Runtime::new();
    rt.type_text("svelte");
    rt.elapse_timers();
    let first = rt.take_request();
    rt.respond(&first, repos("sveltejs", 0..10));

    rt.send(Event::ReachedScrollEnd);
    let more = rt.take_request();
    rt.fail(&more, "connection reset");

    assert_eq!(rt.app.search.results.len(), 10);
    assert_eq!(rt.app.search.page, 1);
    assert!(!rt.app.search.fetching_more);
    assert!(rt.app.search.error.is_some());

    rt.send(Event::ReachedScrollEnd);
    assert_eq!(rt.take_request().page, 2, "the failed page is retried");
}

#[test]
fn empty_text_never_reaches_the_network() {
    let mut rt = Runtime::new();
    rt.type_text("a");
    rt.send(Event::Backspace);
    rt.elapse_timers();

    assert!(rt.in_flight.is_empty());
    assert_eq!(rt.app.search.view_status(), ViewStatus::Prompt);
}

#[test]
fn decoded_api_error_flows_into_banner() {
    let mut rt = Runtime::new();
    rt.type_text("q");
    rt.elapse_timers();
    let request = rt.take_request();

    let outcome = decode_response(422, br#"{"message":"Validation Failed"}"#).map_err(|e| e.to_string());
    rt.send(Event::SearchCompleted {
        tag: request.tag.clone(),
        outcome,
    });

    let message = rt.app.search.error.as_ref().map(|e| e.message.clone()).unwrap();
    assert!(message.contains("GitHub API error (422): Validation Failed"), "{message}");
}

#[test]
fn request_tag_round_trips_through_host_context() {
    let mut rt = Runtime::new();
    rt.type_text("zellij");
    rt.elapse_timers();
    let request = rt.take_request();

    let tag = reposcout::app::RequestTag::from_context(&request.context()).unwrap();
    assert_eq!(tag, request.tag);
    assert!(rt.respond(&request, repos("zellij-org", 0..1)));
}
