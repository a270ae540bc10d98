//! Event-driven HTML writer over pulldown-cmark.
//!
//! Converts a Markdown event stream to HTML. Headings are emitted with a
//! leading permalink anchor and no `id` attribute — heading IDs and the table
//! of contents are the post-processor's job, which also strips the permalink
//! anchors when extracting heading text.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::escape::escape_html;

/// Streaming HTML writer.
pub(crate) struct HtmlWriter {
    output: String,
    permalink_symbol: String,
    /// Language and buffered content of the active code block, if any.
    code: Option<(Option<String>, String)>,
    /// Buffered alt text plus src/title of the active image, if any.
    image: Option<(String, String, String)>,
    table_alignments: Vec<Alignment>,
    table_cell: usize,
    in_table_head: bool,
}

impl HtmlWriter {
    pub(crate) fn new(permalink_symbol: &str) -> Self {
        Self {
            output: String::with_capacity(4096),
            permalink_symbol: permalink_symbol.to_owned(),
            code: None,
            image: None,
            table_alignments: Vec::new(),
            table_cell: 0,
            in_table_head: false,
        }
    }

    pub(crate) fn run<'a, I>(mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.event(event);
        }
        self.output
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                write!(self.output, "<code>{}</code>", escape_html(&code))
                    .expect("writing to String");
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled> "#
                } else {
                    r#"<input type="checkbox" disabled> "#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                let n = level_num(level);
                let symbol = escape_html(&self.permalink_symbol);
                write!(
                    self.output,
                    r##"<h{n}><a class="heading-permalink" href="#" aria-hidden="true">{symbol}</a>"##
                )
                .expect("writing to String");
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => {
                        // Fence info may carry attributes after the language
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    write!(self.output, r#"<ol start="{n}">"#).expect("writing to String");
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_cell = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table_cell = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.in_table_head { "th" } else { "td" };
                let align = match self.table_alignments.get(self.table_cell) {
                    Some(Alignment::Left) => r#" style="text-align: left""#,
                    Some(Alignment::Center) => r#" style="text-align: center""#,
                    Some(Alignment::Right) => r#" style="text-align: right""#,
                    _ => "",
                };
                write!(self.output, "<{tag}{align}>").expect("writing to String");
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                write!(self.output, r#"<a href="{}">"#, escape_html(&dest_url))
                    .expect("writing to String");
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some((dest_url.to_string(), title.to_string(), String::new()));
            }
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", level_num(level)).expect("writing to String");
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code.take() {
                    match lang {
                        Some(lang) => {
                            write!(
                                self.output,
                                r#"<pre><code class="language-{}">{}</code></pre>"#,
                                escape_html(&lang),
                                escape_html(&content)
                            )
                            .expect("writing to String");
                        }
                        None => {
                            write!(
                                self.output,
                                "<pre><code>{}</code></pre>",
                                escape_html(&content)
                            )
                            .expect("writing to String");
                        }
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
                self.table_cell += 1;
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.take() {
                    if title.is_empty() {
                        write!(
                            self.output,
                            r#"<img src="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&alt)
                        )
                        .expect("writing to String");
                    } else {
                        write!(
                            self.output,
                            r#"<img src="{}" alt="{}" title="{}">"#,
                            escape_html(&src),
                            escape_html(&alt),
                            escape_html(&title)
                        )
                        .expect("writing to String");
                    }
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, buf)) = self.code.as_mut() {
            buf.push_str(text);
        } else if let Some((_, _, alt)) = self.image.as_mut() {
            alt.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }
}

fn level_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
