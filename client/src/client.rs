use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use nostr_sdk::{
  event::{kind::EventKind, Event, PubKey, Timestamp},
  filter::Filter,
};

use crate::{
  config::Config,
  error::Error,
  note::{build_note, ArticleForm, NotesCache},
  pool::{fetch_first_available, fetch_from_all, publish_to_all, RelayOutcome},
  session::RelayConnector,
  signer::Signer,
};

///
/// Reads and writes an author's long-form articles on every configured relay.
///
/// Keeps the articles of the last [`Client::fetch_notes`] around so one of
/// them can be loaded back into a form, edited and published again.
///
#[derive(Debug)]
pub struct Client<C, S> {
  connector: C,
  signer: S,
  config: Config,
  notes: NotesCache,
}

impl<C, S> Client<C, S>
where
  C: RelayConnector,
  S: Signer,
{
  pub fn new(connector: C, signer: S, config: Config) -> Self {
    Self {
      connector,
      signer,
      config,
      notes: NotesCache::new(),
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn notes(&self) -> &NotesCache {
    &self.notes
  }

  /// The configured author, or the signer's own public key when none is set.
  pub async fn author(&self) -> Result<PubKey, Error> {
    match &self.config.author {
      Some(author) => Ok(author.clone()),
      None => self.signer.get_public_key().await,
    }
  }

  /// Fetches the articles of `author` and returns their `d` tags.
  pub async fn fetch_notes(&mut self, author: &str) -> Result<Vec<String>, Error> {
    let filter = Filter::new()
      .authors(vec![author.to_string()])
      .kinds(vec![EventKind::LongFormContent]);

    let events = fetch_from_all(
      &self.connector,
      &self.config.relays,
      &[filter],
      self.config.timeouts.connect,
      self.config.timeouts.subscribe,
    )
    .await?;

    self.notes.refresh(events);
    info!("{} articles by {}", self.notes.len(), author);

    Ok(self.notes.d_tags().to_vec())
  }

  /// The article with `d_tag` from the last fetch, as a form.
  pub fn load_note(&self, d_tag: &str) -> Option<ArticleForm> {
    let note = self.notes.get(d_tag);
    if note.is_none() {
      debug!("No article {} in the cache", d_tag);
    }
    note.map(ArticleForm::from_event)
  }

  /// Signs the article in `form` and publishes it to every relay.
  pub async fn publish_note(&self, form: &ArticleForm) -> Result<(Event, Vec<RelayOutcome<()>>), Error> {
    let draft = build_note(form, now());
    let event = self.signer.sign_event(draft).await?;

    let outcomes = publish_to_all(
      &self.connector,
      &self.config.relays,
      &event,
      self.config.timeouts.connect,
      self.config.timeouts.publish,
    )
    .await?;

    for RelayOutcome { url, outcome } in &outcomes {
      match outcome.is_success() {
        true => info!("{} has accepted {}", url, event.id),
        false => warn!("Failed to publish {} to {}: {}", event.id, url, outcome),
      }
    }

    Ok((event, outcomes))
  }

  /// Newest relay list (NIP-65) of `author` from whichever relay answers first.
  pub async fn fetch_relay_list(&self, author: &str) -> Result<Option<Event>, Error> {
    let filter = Filter::new()
      .authors(vec![author.to_string()])
      .kinds(vec![EventKind::RelayList]);

    fetch_first_available(
      &self.connector,
      &self.config.relays,
      &[filter],
      self.config.timeouts.connect,
      self.config.timeouts.subscribe,
    )
    .await
  }
}

fn now() -> Timestamp {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default()
}
