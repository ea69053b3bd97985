use crate::midi::messages::Message;
use crate::midi::types::U4;
use crate::time::TicksTime;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MidiEvent {
  pub tick: TicksTime,
  pub message: Message,
}

impl MidiEvent {
  pub fn new<T>(tick: T, message: Message) -> MidiEvent
  where
    T: Into<TicksTime>,
  {
    MidiEvent {
      tick: tick.into(),
      message,
    }
  }
}

/// An ordered list of raw events.
///
/// Edits append events at the end, so the list is only guaranteed to be in
/// tick order after `sort_events`, with note-offs before note-ons at the
/// same tick.
#[derive(Debug, Clone, Default)]
pub struct MidiTrack {
  name: Option<String>,
  primary_channel: Option<U4>,
  events: Vec<MidiEvent>,
}

impl MidiTrack {
  pub fn new() -> MidiTrack {
    MidiTrack::default()
  }

  pub fn with_name<T>(name: T) -> MidiTrack
  where
    T: Into<String>,
  {
    MidiTrack {
      name: Some(name.into()),
      ..MidiTrack::default()
    }
  }

  pub fn set_name<T>(&mut self, name: T)
  where
    T: Into<String>,
  {
    self.name = Some(name.into());
  }

  pub fn get_name(&self) -> Option<&str> {
    self.name.as_ref().map(|name| name.as_str())
  }

  pub fn set_primary_channel(&mut self, channel: U4) {
    self.primary_channel = Some(channel);
  }

  /// The explicit primary channel, or the channel of the first channel message, or 0
  pub fn primary_channel(&self) -> U4 {
    self.primary_channel.unwrap_or_else(|| {
      self
        .events
        .iter()
        .filter_map(|event| event.message.channel())
        .next()
        .unwrap_or(0)
    })
  }

  pub fn events(&self) -> &[MidiEvent] {
    self.events.as_slice()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  pub fn push_event(&mut self, event: MidiEvent) -> &mut Self {
    self.events.push(event);
    self
  }

  pub fn push<T>(&mut self, tick: T, message: Message) -> &mut Self
  where
    T: Into<TicksTime>,
  {
    self.push_event(MidiEvent::new(tick, message))
  }

  /// Inserts at `index`, or appends when the index is past the end
  pub fn insert_event(&mut self, index: usize, event: MidiEvent) {
    let index = index.min(self.events.len());
    self.events.insert(index, event);
  }

  pub fn remove_event(&mut self, index: usize) -> Option<MidiEvent> {
    if index < self.events.len() {
      Some(self.events.remove(index))
    } else {
      None
    }
  }

  /// Stable sort by tick. At the same tick note-offs go first and note-ons
  /// last, so a note ending where the next one on the same key starts stays
  /// closed. Other events at the same tick keep their relative order.
  pub fn sort_events(&mut self) {
    self
      .events
      .sort_by_key(sort_key);
  }

  pub fn is_sorted(&self) -> bool {
    self
      .events
      .windows(2)
      .all(|pair| sort_key(&pair[0]) <= sort_key(&pair[1]))
  }
}

fn sort_key(event: &MidiEvent) -> (TicksTime, u8) {
  (event.tick, same_tick_rank(&event.message))
}

fn same_tick_rank(message: &Message) -> u8 {
  if message.is_note_off() {
    0
  } else if message.is_note_on() {
    2
  } else {
    1
  }
}
