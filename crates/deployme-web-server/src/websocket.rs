//! Live reload channel between the dev server and open landing pages.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Path of the live reload WebSocket endpoint.
pub const HMR_SOCKET_PATH: &str = "/__hmr";

/// Path the client script is served from.
pub const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Messages sent to open pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// Page markup changed; reload the document
    Reload,

    /// Only the color tokens changed; refetch the stylesheet in place
    Stylesheet,

    /// Connection established
    Connected,
}

/// Hub broadcasting reload messages to every open page.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// Send a message to all open pages.
    pub fn send(&self, msg: HmrMessage) {
        // No receivers is fine: nobody has the page open.
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser side of the live reload channel.
///
/// Connects back to whichever host served the page, so it works behind any bind address.
/// Color token edits swap the stylesheet without losing scroll position or the open menu.
/// After a dropped connection it retries with backoff and reloads once the server is back,
/// since the page may have changed while it was down.
pub const HMR_CLIENT_SCRIPT: &str = r#"(function () {
  'use strict';

  var MAX_DELAY = 5000;
  var delay = 250;
  var dropped = false;

  function refreshStylesheet() {
    var link = document.querySelector('link[rel="stylesheet"][href*="assets/main.css"]');
    if (!link) {
      location.reload();
      return;
    }
    var next = link.cloneNode();
    next.href = link.href.split('?')[0] + '?v=' + Date.now();
    next.onload = function () { link.remove(); };
    link.after(next);
  }

  function connect() {
    var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
    var ws = new WebSocket(scheme + location.host + '/__hmr');

    ws.onmessage = function (event) {
      var msg = JSON.parse(event.data);
      switch (msg.type) {
        case 'connected':
          delay = 250;
          if (dropped) location.reload();
          break;
        case 'stylesheet':
          refreshStylesheet();
          break;
        case 'reload':
          location.reload();
          break;
      }
    };

    ws.onclose = function () {
      dropped = true;
      setTimeout(connect, delay);
      delay = Math.min(delay * 2, MAX_DELAY);
    };
  }

  connect();
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_broadcasts_messages() {
        let hub = HmrHub::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        hub.send(HmrMessage::Stylesheet);

        assert_eq!(hub.subscriber_count(), 2);
        assert_eq!(first.try_recv().unwrap(), HmrMessage::Stylesheet);
        assert_eq!(second.try_recv().unwrap(), HmrMessage::Stylesheet);
    }

    #[test]
    fn send_without_subscribers_is_ignored() {
        let hub = HmrHub::new();
        hub.send(HmrMessage::Reload);

        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn serializes_messages_with_type_tag() {
        assert_eq!(
            serde_json::to_string(&HmrMessage::Reload).unwrap(),
            r#"{"type":"reload"}"#
        );
        assert_eq!(
            serde_json::to_string(&HmrMessage::Stylesheet).unwrap(),
            r#"{"type":"stylesheet"}"#
        );
        assert_eq!(
            serde_json::to_string(&HmrMessage::Connected).unwrap(),
            r#"{"type":"connected"}"#
        );
    }

    #[test]
    fn client_script_connects_to_serving_host() {
        assert!(HMR_CLIENT_SCRIPT.contains(&format!("location.host + '{}'", HMR_SOCKET_PATH)));
        assert!(!HMR_CLIENT_SCRIPT.contains("0.0.0.0"));
        assert!(!HMR_CLIENT_SCRIPT.contains("127.0.0.1"));
    }

    #[test]
    fn client_script_handles_every_message() {
        for msg in [HmrMessage::Reload, HmrMessage::Stylesheet, HmrMessage::Connected] {
            let json = serde_json::to_value(&msg).unwrap();
            let tag = format!("case '{}':", json["type"].as_str().unwrap());
            assert!(HMR_CLIENT_SCRIPT.contains(&tag), "missing {tag}");
        }
    }

    #[test]
    fn client_script_reconnects_with_backoff() {
        assert!(HMR_CLIENT_SCRIPT.contains("setTimeout(connect, delay)"));
        assert!(HMR_CLIENT_SCRIPT.contains("Math.min(delay * 2, MAX_DELAY)"));
        assert!(HMR_CLIENT_SCRIPT.contains("if (dropped) location.reload()"));
    }
}
