//! Plain MediaWiki page edits.

use crate::client::Client;
use crate::error::{WikibaseError, WikibaseResult};
use crate::transport::{Method, NetworkClient};
use wikibase_protocol::{article_edit_request, protect_request, ArticleEditResponse, ProtectResponse};

impl<C: NetworkClient> Client<C> {
    /// Creates the page `article:<title>` if needed and sets its text to
    /// `body`. Returns the page ID.
    pub fn create_or_update_article(&self, title: &str, body: &str) -> WikibaseResult<u64> {
        if title.is_empty() {
            return Err(WikibaseError::precondition(
                "article title must not be empty",
            ));
        }

        let token = self.edit_token()?;
        let (reply, raw) =
            self.call::<ArticleEditResponse>(Method::Post, article_edit_request(&token, title, body))?;
        let Some(edit) = reply.edit else {
            return Err(WikibaseError::unexpected("no edit in reply", raw));
        };

        tracing::info!(title, page = edit.pageid, result = %edit.result, "edited article");
        Ok(edit.pageid)
    }

    /// Restricts editing of the page with this title to sysops.
    pub fn protect_page_by_title(&self, title: &str) -> WikibaseResult<()> {
        self.protect_page("title", title)
    }

    /// Restricts editing of the page with this ID to sysops.
    pub fn protect_page_by_id(&self, page_id: u64) -> WikibaseResult<()> {
        self.protect_page("pageid", &page_id.to_string())
    }

    fn protect_page(&self, key: &str, value: &str) -> WikibaseResult<()> {
        let token = self.edit_token()?;
        self.call::<ProtectResponse>(Method::Post, protect_request(&token, key, value))?;
        tracing::info!(key, value, "protected page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptedClient;

    #[test]
    fn article_edit_returns_page_id() {
        let network = ScriptedClient::new();
        network.push_response(
            r#"{"edit":{"result":"Success","pageid":94,"title":"Article:Intro","contentmodel":"wikitext","oldrevid":0,"newrevid":371,"newtimestamp":"2018-06-01T10:00:00Z"}}"#,
        );
        let client = Client::new(&network).with_edit_token("tok");

        assert_eq!(client.create_or_update_article("Intro", "Hello").unwrap(), 94);
        let call = network.last_call().unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.args["title"], "article:Intro");
        assert_eq!(call.args["text"], "Hello");
        assert_eq!(call.args["token"], "tok");
    }

    #[test]
    fn article_edit_without_edit_body() {
        let network = ScriptedClient::new();
        network.push_response("{}");
        let client = Client::new(&network).with_edit_token("tok");
        assert!(matches!(
            client.create_or_update_article("Intro", "Hello"),
            Err(WikibaseError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn article_title_required() {
        let network = ScriptedClient::new();
        let client = Client::new(&network).with_edit_token("tok");
        assert!(matches!(
            client.create_or_update_article("", "Hello"),
            Err(WikibaseError::Precondition(_))
        ));
        assert_eq!(network.invocation_count(), 0);
    }

    #[test]
    fn protect_by_id_and_title() {
        let network = ScriptedClient::new();
        network.push_response(r#"{"protect":{"title":"Article:Intro","reason":"","protections":[{"edit":"sysop","expiry":"infinite"}]}}"#);
        network.push_response(r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#);
        let client = Client::new(&network).with_edit_token("tok");

        client.protect_page_by_id(94).unwrap();
        assert_eq!(network.last_call().unwrap().args["pageid"], "94");

        let err = client.protect_page_by_title("Nope").unwrap_err();
        assert_eq!(err.api_error().unwrap().code, "missingtitle");
        assert_eq!(network.last_call().unwrap().args["title"], "Nope");
    }
}
