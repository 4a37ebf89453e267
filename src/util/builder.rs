use twilight_model::channel::embed::{Embed, EmbedField, EmbedFooter};

#[derive(Clone, Debug)]
pub struct EmbedBuilder(Embed);

impl EmbedBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Embed {
            author: None,
            color: None,
            description: None,
            fields: Vec::new(),
            footer: None,
            image: None,
            kind: "rich".to_owned(),
            provider: None,
            thumbnail: None,
            timestamp: None,
            title: None,
            url: None,
            video: None,
        })
    }

    pub fn build(self) -> Embed {
        self.0
    }

    pub fn color(mut self, color: u32) -> Self {
        self.0.color = Some(color);

        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());

        self
    }

    pub fn fields(mut self, fields: Vec<EmbedField>) -> Self {
        self.0.fields = fields;

        self
    }

    pub fn footer(mut self, footer: FooterBuilder) -> Self {
        self.0.footer = Some(footer.build());

        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());

        self
    }
}

#[derive(Clone, Debug)]
pub struct FooterBuilder(EmbedFooter);

impl FooterBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self(EmbedFooter {
            text: text.into(),
            icon_url: None,
            proxy_icon_url: None,
        })
    }

    pub fn build(self) -> EmbedFooter {
        self.0
    }
}
