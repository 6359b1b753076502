use crate::models::{ContentRequest, ContentType, Tone};

const EMAIL_PROFESSIONAL: &str = "\
Subject: {subject}

Dear {recipient},

Thank you for reaching out to Quantalyze Digital Agency. We specialize in delivering innovative digital solutions that drive business growth.

{body}

We would be delighted to discuss how we can help achieve your goals. Please feel free to schedule a consultation at your convenience.

Best regards,
The Quantalyze Team";

const EMAIL_CASUAL: &str = "\
Hey {recipient}!

Thanks for getting in touch with us at Quantalyze!

{body}

Let's chat and see how we can help you out!

Cheers,
The Quantalyze Team";

const SOCIAL_PROFESSIONAL: &str =
    "🚀 {content} | Quantalyze Digital Agency - Your Partner in Digital Excellence #DigitalMarketing #WebDevelopment";

const SOCIAL_CASUAL: &str = "✨ {content} 💪 #Quantalyze #DigitalAgency";

const RESPONSE_PROFESSIONAL: &str = "\
Thank you for your inquiry about {service}. At Quantalyze, we pride ourselves on delivering exceptional {service} solutions tailored to your specific needs.

{details}

We would love to schedule a call to discuss your project in detail. What time works best for you?";

const RESPONSE_CASUAL: &str = "\
Thanks for reaching out about {service}! We'd love to help you out.

{details}

When's a good time to chat?";

fn template_for(content_type: ContentType, tone: Tone) -> Option<&'static str> {
    match (content_type, tone) {
        (ContentType::Email, Tone::Professional) => Some(EMAIL_PROFESSIONAL),
        (ContentType::Email, Tone::Casual) => Some(EMAIL_CASUAL),
        (ContentType::Social, Tone::Professional) => Some(SOCIAL_PROFESSIONAL),
        (ContentType::Social, Tone::Casual) => Some(SOCIAL_CASUAL),
        (ContentType::Response, Tone::Professional) => Some(RESPONSE_PROFESSIONAL),
        (ContentType::Response, Tone::Casual) => Some(RESPONSE_CASUAL),
        _ => None,
    }
}

/// Offline rendition of a content request, used whenever the model is unavailable.
pub fn render(request: &ContentRequest) -> String {
    let Some(template) = template_for(request.content_type, request.tone) else {
        return format!("Generated content for: {}", request.prompt);
    };

    template
        .replace("{content}", &request.prompt)
        .replace("{body}", &request.prompt)
        .replace("{details}", &request.prompt)
        .replace("{subject}", "Your Inquiry")
        .replace("{recipient}", "Valued Customer")
        .replace("{service}", "our services")
        .trim()
        .to_string()
}
