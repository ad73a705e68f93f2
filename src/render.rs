//! Server-rendered HTML pages.
//! Every value interpolated into markup goes through [`escape`].

use std::collections::BTreeMap;

use crate::model::{Campaign, CampaignSummary, Subscriber};

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title>\
         <style>\
         body{{margin:0;font-family:system-ui,-apple-system,sans-serif;}}\
         .container{{max-width:960px;margin:0 auto;padding:2rem 1rem;}}\
         {}\
         </style>\
         </head>\
         <body>{}</body>\
         </html>",
        escape(title),
        style,
        body
    )
}

pub fn home_page() -> String {
    let style = "body{background:#f9fafb;color:#111827;}\
                 .hero{text-align:center;padding:3rem 0;}\
                 .steps{display:flex;flex-wrap:wrap;gap:1rem;}\
                 .step{flex:1 1 220px;background:#fff;border:1px solid #e5e7eb;border-radius:12px;padding:1.5rem;}\
                 .button{display:inline-block;padding:.75rem 1.25rem;border-radius:8px;background:#0ea5e9;color:#fff;text-decoration:none;}";

    page(
        "Demand Testing Platform",
        style,
        "<div class=\"container\">\
         <section class=\"hero\">\
         <h1>Demand Testing Platform</h1>\
         <p>Create beautiful landing pages, collect email sign-ups, and validate your business ideas quickly.</p>\
         <p><a class=\"button\" href=\"/dashboard\">Go to Dashboard</a></p>\
         </section>\
         <h2>How It Works</h2>\
         <div class=\"steps\">\
         <div class=\"step\"><h3>1. Create a Campaign</h3>\
         <p>Set up a landing page for your product idea with a custom title, colors and call to action.</p></div>\
         <div class=\"step\"><h3>2. Collect Sign-ups</h3>\
         <p>Share the public link and let interested visitors leave their email address.</p></div>\
         <div class=\"step\"><h3>3. Analyze Results</h3>\
         <p>Watch subscriber counts on the dashboard to see which ideas people want.</p></div>\
         </div>\
         <p><a href=\"/dashboard/campaigns/new\">Create your first campaign</a></p>\
         </div>",
    )
}

/// Public landing page with the signup form
pub fn landing_page(campaign: &Campaign) -> String {
    let config = campaign.config.resolved();
    let colors = config.colors;

    let style = format!(
        "body{{background:{bg};color:{text};}}\
         .brand img{{max-height:48px;}}\
         .hero{{display:flex;flex-wrap:wrap;gap:2rem;align-items:center;}}\
         .hero>div{{flex:1 1 320px;}}\
         .hero img{{width:100%;border-radius:12px;}}\
         .placeholder{{height:240px;border-radius:12px;background:{secondary};opacity:.3;}}\
         form{{display:flex;flex-direction:column;gap:.75rem;max-width:420px;}}\
         input{{padding:.75rem;border:1px solid #d1d5db;border-radius:8px;font-size:1rem;}}\
         button{{padding:.75rem;border:0;border-radius:8px;background:{primary};color:#fff;font-size:1rem;cursor:pointer;}}\
         button:hover{{background:{secondary};}}\
         .error{{color:#b91c1c;}}\
         .hidden{{display:none;}}",
        bg = escape(colors.background),
        text = escape(colors.text),
        primary = escape(colors.primary),
        secondary = escape(colors.secondary),
    );

    let brand = match config.logo_url {
        Some(logo) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(logo),
            escape(&campaign.name)
        ),
        None => format!("<strong>{}</strong>", escape(&campaign.name)),
    };
    let hero = match config.hero_image_url {
        Some(image) => format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape(image),
            escape(config.title)
        ),
        None => "<div class=\"placeholder\"></div>".to_string(),
    };
    let subtitle = config
        .subtitle
        .map(|s| format!("<p class=\"subtitle\">{}</p>", escape(s)))
        .unwrap_or_default();

    let body = format!(
        "<div class=\"container\">\
         <header class=\"brand\">{brand}</header>\
         <section class=\"hero\">\
         <div>\
         <h1>{title}</h1>\
         {subtitle}\
         <form id=\"signup\" data-campaign-id=\"{id}\">\
         <input type=\"text\" name=\"name\" placeholder=\"Your name (optional)\">\
         <input type=\"email\" name=\"email\" placeholder=\"you@example.com\" required>\
         <button type=\"submit\">{cta}</button>\
         <p class=\"error hidden\" id=\"signup-error\"></p>\
         </form>\
         <p class=\"hidden\" id=\"signup-thanks\">{thanks}</p>\
         </div>\
         <div>{hero}</div>\
         </section>\
         </div>\
         <script>{script}</script>",
        brand = brand,
        title = escape(config.title),
        subtitle = subtitle,
        id = campaign.id,
        cta = escape(config.cta_text),
        thanks = escape(config.thank_you_message),
        hero = hero,
        script = SIGNUP_SCRIPT,
    );

    page(config.title, &style, &body)
}

const SIGNUP_SCRIPT: &str = r#"
const form = document.getElementById('signup');
const error = document.getElementById('signup-error');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  error.classList.add('hidden');
  const data = new FormData(form);
  const res = await fetch('/api/subscribe', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      email: data.get('email'),
      name: data.get('name') || null,
      campaignId: form.dataset.campaignId,
    }),
  });
  if (res.ok) {
    form.classList.add('hidden');
    document.getElementById('signup-thanks').classList.remove('hidden');
  } else {
    const body = await res.json().catch(() => ({}));
    error.textContent = body.message || 'Something went wrong. Please try again.';
    error.classList.remove('hidden');
  }
});
"#;

pub fn not_found_page() -> String {
    page(
        "Campaign Not Found",
        "body{background:#f9fafb;color:#111827;text-align:center;}",
        "<div class=\"container\">\
         <h1>Campaign Not Found</h1>\
         <p>The campaign you are looking for does not exist or is no longer active.</p>\
         </div>",
    )
}

/// Operator overview of every campaign, `base_url` is used to build public links
pub fn dashboard_page(campaigns: &[CampaignSummary], base_url: &str) -> String {
    let style = "body{background:#f9fafb;color:#111827;}\
                 header{display:flex;justify-content:space-between;align-items:center;}\
                 table{width:100%;border-collapse:collapse;background:#fff;}\
                 th,td{padding:.75rem;border-bottom:1px solid #e5e7eb;text-align:left;}\
                 .active{color:#047857;}\
                 .inactive{color:#6b7280;}";

    let mut body = String::from(
        "<div class=\"container\">\
         <header><h1>Campaign Dashboard</h1>\
         <a href=\"/dashboard/campaigns/new\">New campaign</a></header>",
    );

    if campaigns.is_empty() {
        body.push_str(
            "<div class=\"empty\">\
             <p>No campaigns yet.</p>\
             <p><a href=\"/dashboard/campaigns/new\">Create your first campaign</a> \
             or load the sample with <code>POST /api/seed</code>.</p>\
             </div>",
        );
    } else {
        body.push_str(
            "<table><thead><tr>\
             <th>Name</th><th>Public URL</th><th>Status</th><th>Subscribers</th><th>Created</th><th></th>\
             </tr></thead><tbody>",
        );
        let base_url = base_url.trim_end_matches('/');
        for campaign in campaigns {
            let url = format!("{}/c/{}", base_url, campaign.slug);
            let (status_class, status) = if campaign.active {
                ("active", "Active")
            } else {
                ("inactive", "Inactive")
            };
            let description = campaign
                .description
                .as_deref()
                .map(|d| format!("<br><small>{}</small>", escape(d)))
                .unwrap_or_default();

            body.push_str(&format!(
                "<tr>\
                 <td><strong>{name}</strong>{description}</td>\
                 <td><a href=\"{url}\">{url}</a></td>\
                 <td class=\"{status_class}\">{status}</td>\
                 <td>{count}</td>\
                 <td>{created}</td>\
                 <td><a href=\"/dashboard/campaigns/{id}/subscribers\">View subscribers</a></td>\
                 </tr>",
                name = escape(&campaign.name),
                description = description,
                url = escape(&url),
                status_class = status_class,
                status = status,
                count = campaign.subscriber_count,
                created = campaign.created_at.format("%Y-%m-%d"),
                id = campaign.id,
            ));
        }
        body.push_str("</tbody></table>");
    }
    body.push_str("</div>");

    page("Campaign Dashboard", style, &body)
}

/// Signups for one campaign, in the order given
pub fn subscribers_page(campaign: &Campaign, subscribers: &[Subscriber]) -> String {
    let style = "body{background:#f9fafb;color:#111827;}\
                 table{width:100%;border-collapse:collapse;background:#fff;}\
                 th,td{padding:.75rem;border-bottom:1px solid #e5e7eb;text-align:left;}";

    let mut body = format!(
        "<div class=\"container\">\
         <p><a href=\"/dashboard\">Back to dashboard</a></p>\
         <h1>{name}</h1>\
         <p>{count} subscriber(s) on <code>/c/{slug}</code></p>",
        name = escape(&campaign.name),
        count = subscribers.len(),
        slug = escape(&campaign.slug),
    );

    if subscribers.is_empty() {
        body.push_str("<p class=\"empty\">No subscribers yet.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>Email</th><th>Name</th><th>Signed up</th></tr></thead><tbody>",
        );
        for subscriber in subscribers {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&subscriber.email),
                escape(subscriber.name.as_deref().unwrap_or("")),
                subscriber.created_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        body.push_str("</tbody></table>");
    }
    body.push_str("</div>");

    page(&format!("Subscribers: {}", campaign.name), style, &body)
}

/// Operator form for a new campaign, submitted as JSON to the campaign API
pub fn new_campaign_page() -> String {
    let style = "body{background:#f9fafb;color:#111827;}\
                 form{display:flex;flex-direction:column;gap:.75rem;max-width:560px;}\
                 label{display:flex;flex-direction:column;gap:.25rem;font-weight:600;}\
                 label.inline{flex-direction:row;align-items:center;gap:.5rem;}\
                 input,textarea,select{padding:.6rem;border:1px solid #d1d5db;border-radius:8px;font-size:1rem;font-weight:400;}\
                 fieldset{border:1px solid #e5e7eb;border-radius:8px;display:flex;flex-direction:column;gap:.75rem;}\
                 button{padding:.75rem;border:0;border-radius:8px;background:#0ea5e9;color:#fff;font-size:1rem;cursor:pointer;}\
                 .error{color:#b91c1c;}\
                 .hidden{display:none;}";

    let body = format!(
        "<div class=\"container\">\
         <p><a href=\"/dashboard\">Back to dashboard</a></p>\
         <h1>New Campaign</h1>\
         <form id=\"campaign\">\
         <label>Name<input type=\"text\" name=\"name\" required></label>\
         <label>Slug <small>/c/&lt;slug&gt;</small>\
         <input type=\"text\" name=\"slug\" pattern=\"[a-z0-9-]+\" required></label>\
         <label>Description<textarea name=\"description\"></textarea></label>\
         <label class=\"inline\"><input type=\"checkbox\" name=\"active\" checked>Active</label>\
         <label>Template<select name=\"template\">\
         <option value=\"default\">Default</option>\
         <option value=\"modern\">Modern</option>\
         </select></label>\
         <fieldset><legend>Landing page</legend>\
         <label>Title<input type=\"text\" name=\"title\" required></label>\
         <label>Subtitle<input type=\"text\" name=\"subtitle\"></label>\
         <label>Button text<input type=\"text\" name=\"ctaText\" placeholder=\"Join the Waitlist\"></label>\
         <label>Thank-you message<textarea name=\"thankYouMessage\"></textarea></label>\
         <label>Logo URL<input type=\"url\" name=\"logoUrl\"></label>\
         <label>Hero image URL<input type=\"url\" name=\"heroImageUrl\"></label>\
         </fieldset>\
         <fieldset><legend>Colors</legend>\
         <label>Primary<input type=\"text\" name=\"primary\" placeholder=\"#0ea5e9\"></label>\
         <label>Secondary<input type=\"text\" name=\"secondary\" placeholder=\"#0284c7\"></label>\
         <label>Background<input type=\"text\" name=\"background\" placeholder=\"#ffffff\"></label>\
         <label>Text<input type=\"text\" name=\"text\" placeholder=\"#111827\"></label>\
         </fieldset>\
         <button type=\"submit\">Create campaign</button>\
         <p class=\"error hidden\" id=\"campaign-error\"></p>\
         </form>\
         </div>\
         <script>{}</script>",
        CAMPAIGN_FORM_SCRIPT
    );

    page("New Campaign", style, &body)
}

const CAMPAIGN_FORM_SCRIPT: &str = r#"
const form = document.getElementById('campaign');
const error = document.getElementById('campaign-error');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  error.classList.add('hidden');
  const data = new FormData(form);
  const field = (name) => (data.get(name) || '').trim() || null;
  const res = await fetch('/api/campaigns', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      name: field('name'),
      slug: field('slug'),
      description: field('description'),
      active: data.get('active') === 'on',
      template: field('template'),
      config: {
        title: field('title') || '',
        subtitle: field('subtitle'),
        ctaText: field('ctaText'),
        thankYouMessage: field('thankYouMessage'),
        logoUrl: field('logoUrl'),
        heroImageUrl: field('heroImageUrl'),
        colors: {
          primary: field('primary'),
          secondary: field('secondary'),
          background: field('background'),
          text: field('text'),
        },
      },
    }),
  });
  if (res.ok) {
    window.location = '/dashboard';
  } else {
    const body = await res.json().catch(() => ({}));
    error.textContent = body.message || 'Unable to create the campaign.';
    error.classList.remove('hidden');
  }
});
"#;

/// Pricing test page with one checkout button per configured plan
pub fn pricing_page(prices: &BTreeMap<String, String>) -> String {
    let style = "body{background:#f9fafb;color:#111827;}\
                 .plans{display:flex;flex-wrap:wrap;gap:1rem;}\
                 .plan{flex:1 1 220px;background:#fff;border:1px solid #e5e7eb;border-radius:12px;padding:1.5rem;}\
                 button{padding:.75rem 1rem;border:0;border-radius:8px;background:#0ea5e9;color:#fff;cursor:pointer;}\
                 .error{color:#b91c1c;}";

    let mut plans = String::new();
    for (plan, price_id) in prices {
        plans.push_str(&format!(
            "<div class=\"plan\">\
             <h2>{plan}</h2>\
             <p><code>{price}</code></p>\
             <button data-price-id=\"{price}\">Buy {plan}</button>\
             </div>",
            plan = escape(plan),
            price = escape(price_id),
        ));
    }

    let body = format!(
        "<div class=\"container\">\
         <h1>Test Features</h1>\
         <p>Pick a plan to start a test checkout.</p>\
         <div class=\"plans\">{}</div>\
         <p class=\"error\" id=\"checkout-error\"></p>\
         </div>\
         <script>{}</script>",
        plans, CHECKOUT_SCRIPT
    );

    page("Test Features", style, &body)
}

const CHECKOUT_SCRIPT: &str = r#"
document.querySelectorAll('button[data-price-id]').forEach((button) => {
  button.addEventListener('click', async () => {
    const res = await fetch('/api/create-checkout-session', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ priceId: button.dataset.priceId }),
    });
    const body = await res.json().catch(() => ({}));
    if (res.ok && body.url) {
      window.location = body.url;
    } else {
      document.getElementById('checkout-error').textContent =
        body.message || 'Unable to start checkout.';
    }
  });
});
"#;

pub fn success_page(session_id: Option<&str>) -> String {
    let reference = session_id
        .map(|id| format!("<p>Reference: <code>{}</code></p>", escape(id)))
        .unwrap_or_default();

    let body = format!(
        "<div class=\"container\">\
         <h1>Payment Successful</h1>\
         <p>Thank you for your purchase!</p>\
         {}\
         <p><a href=\"/test-features\">Back to plans</a></p>\
         </div>",
        reference
    );

    page(
        "Payment Successful",
        "body{background:#f0fdf4;color:#14532d;text-align:center;}",
        &body,
    )
}
