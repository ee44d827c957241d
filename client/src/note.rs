use std::collections::HashMap;

use nostr_sdk::event::{kind::EventKind, tag::Tag, Event, Timestamp};

use crate::signer::EventDraft;

/// Value of the `client` tag of every article we publish.
pub const CLIENT_NAME: &str = "longpub";

///
/// The fields of a long-form article (NIP-23) as a user types them.
///
/// `t_tags` is a comma separated list of hashtags and `published_at`
/// a unix timestamp in seconds.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArticleForm {
  pub d_tag: String,
  pub title: String,
  pub published_at: String,
  pub image: String,
  pub t_tags: String,
  pub summary: String,
  pub content: String,
}

impl ArticleForm {
  /// Fills a form back from a published article.
  pub fn from_event(event: &Event) -> Self {
    Self {
      d_tag: event.tag_value("d").unwrap_or_default(),
      title: event.tag_value("title").unwrap_or_default(),
      published_at: event.tag_value("published_at").unwrap_or_default(),
      image: event.tag_value("image").unwrap_or_default(),
      t_tags: event.tag_values("t").join(", "),
      summary: event.tag_value("summary").unwrap_or_default(),
      content: event.content.clone(),
    }
  }
}

/// Turns a form into an unsigned article. Empty fields get no tag.
pub fn build_note(form: &ArticleForm, created_at: Timestamp) -> EventDraft {
  let t_tags: Vec<String> = form
    .t_tags
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(String::from)
    .collect();

  let mut tags: Vec<Tag> = [
    text_tag("d", &form.d_tag),
    text_tag("title", &form.title),
    text_tag("image", &form.image),
    (!t_tags.is_empty()).then(|| Tag::new("t", t_tags)),
    text_tag("published_at", &form.published_at),
    text_tag("summary", &form.summary),
  ]
  .into_iter()
  .flatten()
  .collect();
  tags.push(Tag::new("client", vec![CLIENT_NAME.to_string()]));

  EventDraft {
    kind: EventKind::LongFormContent,
    tags,
    content: form.content.trim().to_string(),
    created_at,
  }
}

fn text_tag(name: &str, value: &str) -> Option<Tag> {
  let value = value.trim();
  (!value.is_empty()).then(|| Tag::new(name, vec![value.to_string()]))
}

/// The author's articles by `d` tag, as of the last fetch.
#[derive(Debug, Default, Clone)]
pub struct NotesCache {
  d_tags: Vec<String>,
  notes: HashMap<String, Event>,
}

impl NotesCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the whole cache with `events`.
  ///
  /// Events without a `d` tag are skipped. For a repeated `d` tag the newest
  /// event stays (the first one on equal timestamps).
  pub fn refresh(&mut self, events: Vec<Event>) {
    self.d_tags.clear();
    self.notes.clear();

    for event in events {
      let Some(d_tag) = event.tag_value("d") else {
        continue;
      };

      match self.notes.get(&d_tag) {
        Some(cached) if cached.created_at >= event.created_at => {}
        Some(_) => {
          self.notes.insert(d_tag, event);
        }
        None => {
          self.d_tags.push(d_tag.clone());
          self.notes.insert(d_tag, event);
        }
      }
    }
  }

  /// `d` tags in the order they were first seen.
  pub fn d_tags(&self) -> &[String] {
    &self.d_tags
  }

  pub fn get(&self, d_tag: &str) -> Option<&Event> {
    self.notes.get(d_tag)
  }

  pub fn len(&self) -> usize {
    self.d_tags.len()
  }

  pub fn is_empty(&self) -> bool {
    self.d_tags.is_empty()
  }
}
