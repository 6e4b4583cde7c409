use crate::{
    config::SiteConfig,
    content::BlogPost,
    event::Action,
    output::{
        bindings_script, print_script, rich_text_html, service_worker_registration, HtmlPresenter,
        Listing, PaginationControls, PostBody,
    },
    preferences::Theme,
    route::{Location, Section},
};
use yew::{classes, function_component, html, Html, LocalServerRenderer, Properties};

pub struct AppProps<'a> {
    pub config: &'a SiteConfig,
    pub theme: Theme,
    pub state: &'a HtmlPresenter,
}

pub fn app(props: AppProps<'_>) -> Html {
    let style = Html::from_html_unchecked(
        r#"
        :root {
            --accent: #4d5a41;
            --background: #f4f4ef;
            --surface: white;
            --text: #222222;
        }

        body.dark-theme {
            --accent: #e0ff28;
            --background: #1b1b1b;
            --surface: #2a2a2a;
            --text: #eeeeee;
        }

        html {
            font-size: calc(8px + 0.8vw);
        }

        body {
            background-color: var(--background);
            color: var(--text);
            margin: 2rem;
            font-family: "Helvetica Neue", "Lucida Grande", Arial, Helvetica, sans-serif;
        }

        h1, h2, h3 {
            font-family: Times, "Times New Roman", Georgia, serif;
        }

        a {
            color: var(--accent);
            text-decoration: none;
        }

        #page {
            background-color: var(--surface);
            max-width: 60rem;
            margin: 0 auto;
            border-radius: 0.5rem;
            overflow: hidden;
        }

        @media (max-width: 600px) {
            body {
                margin: 0;
            }

            #page {
                border-radius: 0;
            }
        }

        #header, #footer {
            background-color: #dadfbb;
            color: #222222;
        }

        #header {
            display: flex;
            flex-direction: row;
            gap: 1rem;
            align-items: center;
            padding: 2.25rem 2rem;
        }

        #title {
            font-size: 1.5rem;
            font-weight: normal;
            letter-spacing: 0.1rem;
            flex-grow: 1;
            margin: 0;
        }

        #navigation {
            display: flex;
            gap: 1rem;
        }

        .nav-link {
            color: #4d5a41;
        }

        .nav-link.active {
            font-weight: bold;
            text-decoration: underline;
        }

        main {
            margin: 2rem;
            min-height: 24rem;
        }

        .section {
            display: none;
        }

        .section.active {
            display: block;
        }

        .blog-post {
            border-bottom: 1px dashed darkgray;
            padding: 1rem 0;
            cursor: pointer;
        }

        .blog-post-meta, .blog-post-author {
            font-size: 0.8rem;
            opacity: 0.8;
        }

        .blog-post-tags {
            display: flex;
            gap: 0.5rem;
            padding: 0;
            list-style: none;
        }

        .tag {
            font-size: 0.75rem;
            border: 1px solid currentColor;
            border-radius: 0.25rem;
            padding: 0 0.25rem;
        }

        .pagination-controls {
            display: flex;
            gap: 0.25rem;
            margin-top: 1rem;
        }

        .btn {
            border: 1px solid var(--accent);
            border-radius: 0.25rem;
            padding: 0.25rem 0.75rem;
            cursor: pointer;
        }

        .btn-primary {
            background-color: var(--accent);
            color: var(--surface);
        }

        .btn-secondary {
            background-color: transparent;
            color: var(--accent);
        }

        .empty-state {
            text-align: center;
            padding: 2rem;
        }

        .projects, .goals {
            display: flex;
            flex-wrap: wrap;
            gap: 0.5rem;
            padding: 0;
            list-style: none;
        }

        .project-card, .goal-item {
            border: 1px solid #e6e6e6;
            padding: 0.5rem;
            width: 16rem;
        }

        .goal-item.completed {
            opacity: 0.6;
        }

        #footer {
            text-align: center;
            padding: 0.5rem;
        }

        @media print {
            #header, #footer, .resume-actions {
                display: none;
            }
        }
    "#
        .into(),
    );

    let config = props.config;
    let state = props.state;
    let shown = state.section.unwrap_or_default();
    let section_class =
        |section: Section| classes!("section", (shown == section).then_some("active"));

    html! {
        <html lang="en">
            <head>
                <meta charset="UTF-8"/>
                <title>{config.title.clone()}</title>
                if let Some(description) = config.description.clone() {
                    <meta name="description" content={description}/>
                }
                if let Some(author) = config.author.clone() {
                    <meta name="author" content={author}/>
                }
                <meta name="generator" content="folio"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="manifest" href="/manifest.json"/>
                if let Some(url) = state.redirect.clone() {
                    <meta http-equiv="refresh" content={format!("0; url={url}")}/>
                }
                <style>{style}</style>
            </head>
            <body class={classes!((props.theme == Theme::Dark).then_some("dark-theme"))}>
                <div id="page">
                    <header id="header">
                        <h1 id="title">{config.title.clone()}</h1>
                        <nav id="navigation" aria-label="Sections">
                            {Section::ALL.into_iter().map(|section| html!{
                                <a
                                    class={classes!(
                                        "nav-link",
                                        (state.highlighted == Some(section)).then_some("active"),
                                    )}
                                    href={Location::from(section).fragment()}
                                    data-route={section.name()}
                                    data-action={Action::Navigate(section).binding()}
                                >{section.label()}</a>
                            }).collect::<Html>()}
                        </nav>
                    </header>
                    <main id="main">
                        <section id={Section::About.element_id()} class={section_class(Section::About)}>
                            {about_html(state)}
                        </section>
                        <section id={Section::Blog.element_id()} class={section_class(Section::Blog)}>
                            if let Some(post) = &state.post {
                                {post_html(config, post, state.body.as_ref())}
                            } else {
                                {listing_html(config, state)}
                            }
                        </section>
                        <section id={Section::Resume.element_id()} class={section_class(Section::Resume)}>
                            {resume_html(config)}
                        </section>
                    </main>
                    <footer id="footer">
                        if let Some(author) = config.author.clone() {
                            {format!("© {author} | ")}
                        }
                        {"Powered by folio"}
                    </footer>
                </div>
                if state.icon_refreshes > 0 {
                    <script src="https://unpkg.com/feather-icons"></script>
                    {Html::from_html_unchecked(
                        "<script>if (typeof feather !== 'undefined') { feather.replace(); }</script>".into(),
                    )}
                }
                {bindings_script(&state.location(), state.page())}
                if state.print_requested {
                    {print_script()}
                }
                if let Some(registration) = service_worker_registration(config) {
                    {registration}
                }
            </body>
        </html>
    }
}

fn about_html(state: &HtmlPresenter) -> Html {
    html! {<>
        if let Some(about) = &state.about {
            <div class="hero">
                <h2>{about.name.clone()}</h2>
                if !about.headline.is_empty() {
                    <p class="hero-headline">{about.headline.clone()}</p>
                }
                if !about.summary.is_empty() {
                    <p class="hero-summary">{about.summary.clone()}</p>
                }
                if let Some(location) = about.location.clone() {
                    <p class="hero-location"><i data-feather="map-pin"></i>{location}</p>
                }
                if !about.links.is_empty() {
                    <ul class="hero-links">
                        {about.links.iter().map(|link| html!{
                            <li>
                                <a href={link.url.clone()} target="_blank">
                                    if let Some(icon) = link.icon.clone() {
                                        <i data-feather={icon}></i>
                                    }
                                    {link.label.clone()}
                                </a>
                            </li>
                        }).collect::<Html>()}
                    </ul>
                }
            </div>
        }
        if !state.projects.is_empty() {
            <h2>{"Projects"}</h2>
            <ul class="projects">
                {state.projects.iter().map(|project| html!{
                    <li class="project-card">
                        <h3>
                            if let Some(link) = project.link.clone() {
                                <a href={link} target="_blank">{project.title.clone()}</a>
                            } else {
                                {project.title.clone()}
                            }
                        </h3>
                        <p>{project.description.clone()}</p>
                        if !project.technologies.is_empty() {
                            <p class="project-technologies">{project.technologies.join(", ")}</p>
                        }
                        if let Some(repository) = project.repository.clone() {
                            <a href={repository} target="_blank"><i data-feather="github"></i>{"Source"}</a>
                        }
                    </li>
                }).collect::<Html>()}
            </ul>
        }
        if !state.goals.is_empty() {
            <h2>{"Goals"}</h2>
            <ul class="goals">
                {state.goals.iter().map(|goal| html!{
                    <li class={classes!("goal-item", goal.completed.then_some("completed"))}>
                        <h3>{goal.title.clone()}</h3>
                        <p>{goal.description.clone()}</p>
                    </li>
                }).collect::<Html>()}
            </ul>
        }
    </>}
}

fn listing_html(config: &SiteConfig, state: &HtmlPresenter) -> Html {
    let posts = match &state.listing {
        None => html! {<p class="loading">{"Loading posts…"}</p>},
        Some(Listing::Empty) => empty_state(
            "No Blog Posts Yet",
            "Blog posts will appear here once they are published.",
        ),
        Some(Listing::Unavailable) => empty_state(
            "Unable to Load Blog Posts",
            "There was an error loading the blog posts. Please try again later.",
        ),
        Some(Listing::Page { posts, .. }) => posts
            .iter()
            .map(|post| {
                html! {
                    <article
                        class="blog-post"
                        data-action={Action::OpenPost(post.id.clone()).binding()}
                    >
                        <h2 class="blog-post-title">
                            <a href={Location::Post(post.id.clone()).fragment()}>{post.title.clone()}</a>
                        </h2>
                        <div class="blog-post-meta">
                            {"Published on "}
                            <time datetime={post.date.to_string()}>{config.format_date(post.date)}</time>
                        </div>
                        <p class="blog-post-excerpt">{post.excerpt.clone()}</p>
                    </article>
                }
            })
            .collect::<Html>(),
    };

    html! {<>
        <h2>{"Blog"}</h2>
        <div id="blog-posts">{posts}</div>
        <nav id="pagination" aria-label="Pagination">
            if let Some(controls) = &state.pagination {
                {pagination_html(controls)}
            }
        </nav>
    </>}
}

fn pagination_html(controls: &PaginationControls) -> Html {
    html! {
        <div class="pagination-controls">
            if let Some(previous) = controls.previous {
                <button
                    type="button"
                    class="btn btn-secondary"
                    data-action={Action::ChangePage(previous).binding()}
                >{"Previous"}</button>
            }
            {controls.pages.iter().map(|page| html!{
                <button
                    type="button"
                    class={classes!("btn", if page.current { "btn-primary" } else { "btn-secondary" })}
                    aria-current={page.current.then_some("page")}
                    data-action={Action::ChangePage(page.number).binding()}
                >{page.number.to_string()}</button>
            }).collect::<Html>()}
            if let Some(next) = controls.next {
                <button
                    type="button"
                    class="btn btn-secondary"
                    data-action={Action::ChangePage(next).binding()}
                >{"Next"}</button>
            }
        </div>
    }
}

fn post_html(config: &SiteConfig, post: &BlogPost, body: Option<&PostBody>) -> Html {
    let content = match body {
        None | Some(PostBody::Loading) => html! {<p class="loading">{"Loading…"}</p>},
        Some(PostBody::Loaded(text)) => rich_text_html(text),
        Some(PostBody::Failed) => empty_state(
            "Unable to Load Post",
            "The content of this post could not be loaded. Please try again later.",
        ),
    };

    html! {
        <article id="blog-post-detail" class="blog-post-detail">
            <a
                class="back-link"
                href={Location::from(Section::Blog).fragment()}
                data-action={Action::Navigate(Section::Blog).binding()}
            ><i data-feather="arrow-left"></i>{"Back to Blog"}</a>
            <h1 class="blog-post-title">{post.title.clone()}</h1>
            <div class="blog-post-meta">
                <time datetime={post.date.to_string()}>{config.format_date(post.date)}</time>
                if let Some(author) = post.author.clone() {
                    <span class="blog-post-author">{format!(" by {author}")}</span>
                }
            </div>
            if !post.tags.is_empty() {
                <ul class="blog-post-tags">
                    {post.tags.iter().map(|tag| html!{
                        <li class="tag">{tag.clone()}</li>
                    }).collect::<Html>()}
                </ul>
            }
            <div id="blog-post-content" class="blog-post-content">{content}</div>
        </article>
    }
}

fn resume_html(config: &SiteConfig) -> Html {
    html! {<>
        <h2>{"Resume"}</h2>
        <div class="resume-actions">
            if let Some(resume) = config.resume.clone() {
                <a class="btn btn-primary" href={resume} target="_blank">
                    <i data-feather="download"></i>{"Download"}
                </a>
            }
            <button
                type="button"
                class="btn btn-secondary"
                data-action={Action::Print.binding()}
            ><i data-feather="printer"></i>{"Print"}</button>
        </div>
    </>}
}

fn empty_state(heading: &'static str, message: &'static str) -> Html {
    html! {
        <div class="empty-state">
            <h3>{heading}</h3>
            <p>{message}</p>
        </div>
    }
}

pub fn render_html(props: AppProps<'_>) -> String {
    let html = app(props);

    #[derive(Properties, PartialEq)]
    struct InnerAppProps {
        html: Html,
    }

    #[function_component(InnerApp)]
    fn inner_app(props: &InnerAppProps) -> Html {
        props.html.clone()
    }

    let renderer =
        LocalServerRenderer::<InnerApp>::with_props(InnerAppProps { html }).hydratable(false);
    let html = futures::executor::block_on(renderer.render());

    let mut options = markup_fmt::config::FormatOptions::default();
    options.layout.use_tabs = true;
    options.layout.indent_width = 1;
    let mut html =
        markup_fmt::format_text(&html, markup_fmt::Language::Html, &options, |code, _| {
            Ok::<_, std::convert::Infallible>(code.into())
        })
        .unwrap_or(html);

    html.insert_str(0, "<!DOCTYPE html>\n");

    html.lines()
        .filter(|l| !l.chars().all(|c| c.is_whitespace()))
        .map(|l| format!("{l}\n"))
        .collect()
}
