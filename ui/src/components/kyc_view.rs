use dioxus::prelude::*;

use passport_common::passport::DocumentSummary;

use super::app_state::use_app_state;
use super::widgets::tone_class;

#[component]
pub fn KycView() -> Element {
    let app_state = use_app_state();
    let documents = app_state.read().documents.clone();
    let summary = DocumentSummary::of(&documents);
    let overall = summary.overall();
    let ratio = summary.ratio_label();

    rsx! {
        div { class: "kyc",
            header { class: "page-header",
                div {
                    h1 { "KYC Verification" }
                    p { class: "subtitle", "Documents backing your financial passport" }
                }
                span { class: tone_class(overall.tone()), {overall.label()} }
            }

            section { class: "card kyc-summary",
                p { class: "ledger-total", "{ratio}" }
                p { class: "muted", "verified" }
                if summary.pending > 0 {
                    p { "{summary.pending} pending review" }
                }
                if summary.rejected > 0 {
                    p { class: "form-error", "{summary.rejected} rejected" }
                }
            }

            section { class: "card",
                h2 { "Documents" }
                if documents.is_empty() {
                    p { class: "muted", "No documents uploaded yet." }
                }
                table { class: "document-table",
                    thead {
                        tr {
                            th { "Document" }
                            th { "Type" }
                            th { "IPFS hash" }
                            th { "Uploaded" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for doc in documents {
                            tr { key: "{doc.id}",
                                td { "{doc.name}" }
                                td { "{doc.kind}" }
                                td { class: "mono", "{doc.ipfs_hash}" }
                                td { "{doc.uploaded_at}" }
                                td {
                                    span { class: tone_class(doc.status.tone()), {doc.status.label()} }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
