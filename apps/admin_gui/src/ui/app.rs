use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::forms::{ChallengeForm, LoadState};
use shared::{
    domain::{ChallengeId, ChallengeStatus, OrderId, PostId, ProductId},
    protocol::{ChallengeSummary, OrderSummary, PostSummary, ProductSummary},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{
    classify_login_failure, ChallengeOp, UiErrorCategory, UiErrorContext, UiEvent,
};
use crate::controller::orchestration::dispatch_backend_command;
use crate::media;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
    pub username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Login,
    Register,
    Dashboard,
    ActiveChallenges,
    PendingChallenges,
    AddChallenge,
    ReviewChallenge(ChallengeId),
    PostManagement,
    Products,
    Orders,
    Settings,
}

/// Route guard: unauthenticated users see only the auth screens, and
/// authenticated ones are kept out of them.
fn guarded_view(view: AppView, authenticated: bool) -> AppView {
    match (authenticated, view) {
        (false, AppView::Login | AppView::Register) => view,
        (false, _) => AppView::Login,
        (true, AppView::Login | AppView::Register) => AppView::Dashboard,
        (true, _) => view,
    }
}

fn view_title(view: AppView) -> &'static str {
    match view {
        AppView::Login => "Sign in",
        AppView::Register => "Register",
        AppView::Dashboard => "Dashboard",
        AppView::ActiveChallenges => "Active Challenges",
        AppView::PendingChallenges => "Pending Challenges",
        AppView::AddChallenge => "Add Challenge",
        AppView::ReviewChallenge(_) => "Review Challenge",
        AppView::PostManagement => "Post Management",
        AppView::Products => "Products",
        AppView::Orders => "Orders",
        AppView::Settings => "Settings",
    }
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

fn server_environment_label(server_url: &str) -> &'static str {
    let server = server_url.to_ascii_lowercase();
    if server.contains("127.0.0.1") || server.contains("localhost") {
        "Local"
    } else if server.contains("staging") {
        "Staging"
    } else if server.contains("dev") {
        "Development"
    } else {
        "Production"
    }
}

const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(46, 105, 61);
const SUCCESS_STROKE: egui::Color32 = egui::Color32::from_rgb(88, 168, 108);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

enum PhotoPreview {
    Image {
        texture: egui::TextureHandle,
        size: egui::Vec2,
    },
    RemoteUrl,
    DecodeFailed,
}

pub struct AdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    username: String,
    password: String,
    register_username: String,
    register_email: String,
    register_password: String,
    auth_session_established: bool,
    auth_in_flight: bool,

    view: AppView,
    previous_view: AppView,
    status: String,
    status_banner: Option<StatusBanner>,

    add_form: ChallengeForm<AppView>,
    review_form: ChallengeForm<AppView>,
    review_id: Option<ChallengeId>,
    photo_previews: HashMap<String, PhotoPreview>,

    pending_challenges: Vec<ChallengeSummary>,
    active_challenges: Vec<ChallengeSummary>,
    posts: Vec<PostSummary>,
    products: Vec<ProductSummary>,
    orders: Vec<OrderSummary>,
}

impl AdminApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            username: startup.username,
            password: String::new(),
            register_username: String::new(),
            register_email: String::new(),
            register_password: String::new(),
            auth_session_established: false,
            auth_in_flight: false,
            view: AppView::Login,
            previous_view: AppView::Login,
            status: "Not signed in".to_string(),
            status_banner: None,
            add_form: ChallengeForm::new(),
            review_form: ChallengeForm::new(),
            review_id: None,
            photo_previews: HashMap::new(),
            pending_challenges: seeded_challenges(ChallengeStatus::Pending),
            active_challenges: seeded_challenges(ChallengeStatus::Active),
            posts: seeded_posts(),
            products: seeded_products(),
            orders: seeded_orders(),
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::LoginOk => {
                    self.auth_in_flight = false;
                    self.auth_session_established = true;
                    self.status = "Signed in".to_string();
                    self.status_banner = None;
                    self.password.clear();
                    self.navigate(AppView::Dashboard);
                }
                UiEvent::RegisterOk => {
                    self.auth_in_flight = false;
                    self.status = "Account created - sign in to continue".to_string();
                    self.register_password.clear();
                    self.username = self.register_username.clone();
                    self.navigate(AppView::Login);
                }
                UiEvent::Error(err) => {
                    self.auth_in_flight = false;
                    if err.requires_reauth() {
                        self.auth_session_established = false;
                        self.status = format!("Authentication error: {}", err.message());
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message:
                                "Session expired or invalid credentials. Please sign in again."
                                    .to_string(),
                        });
                        self.navigate(AppView::Login);
                    } else {
                        self.status = if err.context() == UiErrorContext::Login {
                            classify_login_failure(err.message())
                        } else {
                            format!("{} error: {}", err_label(err.category()), err.message())
                        };
                        if matches!(
                            err.context(),
                            UiErrorContext::Login
                                | UiErrorContext::Submit
                                | UiErrorContext::BackendStartup
                        ) {
                            self.status_banner = Some(StatusBanner {
                                severity: StatusBannerSeverity::Error,
                                message: self.status.clone(),
                            });
                        }
                    }
                }
                // Late results for a form that already left the screen are
                // dropped rather than applied to whatever replaced it.
                UiEvent::ChallengeSubmitted { op, outcome } => match op {
                    ChallengeOp::Create => {
                        if self.view == AppView::AddChallenge {
                            self.add_form
                                .finish_create(now, outcome, AppView::ActiveChallenges);
                        }
                    }
                    ChallengeOp::Approve => {
                        if matches!(self.view, AppView::ReviewChallenge(_)) {
                            self.review_form.finish_approve(now, outcome);
                        }
                    }
                    ChallengeOp::Delete => {
                        if matches!(self.view, AppView::ReviewChallenge(_)) {
                            self.review_form
                                .finish_delete(now, outcome, AppView::PendingChallenges);
                        }
                    }
                },
                UiEvent::ChallengeLoaded {
                    challenge_id,
                    detail,
                } => {
                    if self.review_id == Some(challenge_id) {
                        self.review_form.loaded(&detail);
                    }
                }
                UiEvent::ChallengeLoadFailed {
                    challenge_id,
                    reason,
                } => {
                    if self.review_id == Some(challenge_id) {
                        tracing::warn!(
                            challenge_id = challenge_id.0,
                            %reason,
                            "challenge load failed"
                        );
                        self.review_form.load_failed(now);
                    }
                }
            }
        }
    }

    fn navigate(&mut self, target: AppView) {
        if self.view == target {
            return;
        }

        // Tearing a form down cancels its scheduled effects; a redirect or
        // message clear must never fire against the next screen.
        match self.view {
            AppView::AddChallenge => self.add_form.cancel_scheduled(),
            AppView::ReviewChallenge(_) => {
                self.review_form.cancel_scheduled();
                self.review_id = None;
            }
            _ => {}
        }
        self.photo_previews.clear();
        self.previous_view = self.view;
        self.view = target;

        match target {
            AppView::AddChallenge => {
                self.add_form = ChallengeForm::new();
            }
            AppView::ReviewChallenge(challenge_id) => {
                self.review_form = ChallengeForm::new();
                self.review_id = Some(challenge_id);
                self.review_form.begin_load();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::FetchChallenge { challenge_id },
                    &mut self.status,
                );
            }
            _ => {}
        }
    }

    fn sign_out(&mut self) {
        self.auth_session_established = false;
        self.status = "Signed out".to_string();
        self.status_banner = None;
        self.password.clear();
        self.navigate(AppView::Login);
    }

    fn try_login(&mut self) {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            self.status = "Username is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter a username.".to_string(),
            });
            return;
        }
        let server_url = self.server_url.trim().to_string();
        if server_url.is_empty() {
            self.status = "Server URL is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter a server URL.".to_string(),
            });
            return;
        }
        if self.password.is_empty() {
            self.status = "Password is required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please enter a password.".to_string(),
            });
            return;
        }

        self.auth_in_flight = true;
        self.status_banner = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Login {
                server_url,
                username,
                password: self.password.clone(),
            },
            &mut self.status,
        );
    }

    fn try_register(&mut self) {
        let username = self.register_username.trim().to_string();
        let email = self.register_email.trim().to_string();
        if username.is_empty() || email.is_empty() || self.register_password.is_empty() {
            self.status = "All registration fields are required".to_string();
            self.status_banner = Some(StatusBanner {
                severity: StatusBannerSeverity::Error,
                message: "Please fill in username, email, and password.".to_string(),
            });
            return;
        }

        self.auth_in_flight = true;
        self.status_banner = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Register {
                username,
                email,
                password: self.register_password.clone(),
            },
            &mut self.status,
        );
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => {
                    (ERROR_FILL, egui::Stroke::new(1.0, ERROR_STROKE))
                }
            };

            egui::Frame::none()
                .fill(fill)
                .stroke(stroke)
                .rounding(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    /// The active form's feedback toast: green for success, red for errors,
    /// gone five seconds after it appeared.
    fn show_form_feedback(&mut self, ui: &mut egui::Ui) {
        let feedback = match self.view {
            AppView::AddChallenge => self.add_form.feedback().cloned(),
            AppView::ReviewChallenge(_) => self.review_form.feedback().cloned(),
            _ => None,
        };
        let Some(feedback) = feedback else {
            return;
        };

        let (fill, stroke) = if feedback.is_error {
            (ERROR_FILL, ERROR_STROKE)
        } else {
            (SUCCESS_FILL, SUCCESS_STROKE)
        };
        egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .rounding(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&feedback.message).color(egui::Color32::WHITE));
            });
        ui.add_space(6.0);
    }

    fn labeled_text_field(
        ui: &mut egui::Ui,
        label: &str,
        hint: &str,
        value: &mut String,
        password: bool,
    ) {
        ui.label(egui::RichText::new(label).strong());
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .password(password)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 520.0);
            ui.add_space((avail.y * 0.14).clamp(18.0, 110.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::group(ui.style())
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.heading("Challenges Admin");
                        ui.weak("Sign in to manage challenges, posts, and the shop.");
                        ui.add_space(8.0);
                        self.show_status_banner(ui);

                        Self::labeled_text_field(
                            ui,
                            "Server URL",
                            "http://localhost:8080",
                            &mut self.server_url,
                            false,
                        );
                        Self::labeled_text_field(
                            ui,
                            "Username",
                            "admin",
                            &mut self.username,
                            false,
                        );
                        Self::labeled_text_field(
                            ui,
                            "Password",
                            "password",
                            &mut self.password,
                            true,
                        );

                        let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                        if enter_pressed && !self.auth_in_flight {
                            self.try_login();
                        }

                        let sign_in = egui::Button::new(
                            egui::RichText::new(if self.auth_in_flight {
                                "Signing in..."
                            } else {
                                "Sign in"
                            })
                            .strong(),
                        )
                        .min_size(egui::vec2(ui.available_width(), 36.0));
                        if ui.add_enabled(!self.auth_in_flight, sign_in).clicked() {
                            self.try_login();
                        }

                        ui.add_space(6.0);
                        if ui.button("Need an account? Register").clicked() {
                            self.navigate(AppView::Register);
                        }

                        ui.add_space(8.0);
                        ui.separator();
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });
    }

    fn show_register_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 520.0);
            ui.add_space((avail.y * 0.14).clamp(18.0, 110.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                egui::Frame::group(ui.style())
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.heading("Create an account");
                        ui.add_space(8.0);
                        self.show_status_banner(ui);

                        Self::labeled_text_field(
                            ui,
                            "Username",
                            "admin",
                            &mut self.register_username,
                            false,
                        );
                        Self::labeled_text_field(
                            ui,
                            "Email",
                            "admin@example.com",
                            &mut self.register_email,
                            false,
                        );
                        Self::labeled_text_field(
                            ui,
                            "Password",
                            "password",
                            &mut self.register_password,
                            true,
                        );

                        let create = egui::Button::new(
                            egui::RichText::new(if self.auth_in_flight {
                                "Creating..."
                            } else {
                                "Create account"
                            })
                            .strong(),
                        )
                        .min_size(egui::vec2(ui.available_width(), 36.0));
                        if ui.add_enabled(!self.auth_in_flight, create).clicked() {
                            self.try_register();
                        }

                        ui.add_space(6.0);
                        if ui.button("Back to sign in").clicked() {
                            self.navigate(AppView::Login);
                        }
                    });
            });
        });
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("Challenges Admin");
            ui.separator();
            ui.label(view_title(self.view));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Sign out").clicked() {
                    self.sign_out();
                }
                ui.separator();
                ui.label(egui::RichText::new(&self.username).strong());
                ui.weak(Local::now().format("%b %e, %Y").to_string());
            });
        });
        ui.add_space(4.0);
    }

    fn show_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        self.nav_item(ui, AppView::Dashboard, "Dashboard");

        ui.add_space(8.0);
        ui.weak("Challenges");
        self.nav_item(ui, AppView::ActiveChallenges, "Active");
        self.nav_item(ui, AppView::PendingChallenges, "Pending");
        self.nav_item(ui, AppView::AddChallenge, "Add new");

        ui.add_space(8.0);
        ui.weak("Content");
        self.nav_item(ui, AppView::PostManagement, "Posts");

        ui.add_space(8.0);
        ui.weak("Shop");
        self.nav_item(ui, AppView::Products, "Products");
        self.nav_item(ui, AppView::Orders, "Orders");

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.add_space(8.0);
            self.nav_item(ui, AppView::Settings, "Settings");
        });
    }

    fn nav_item(&mut self, ui: &mut egui::Ui, target: AppView, label: &str) {
        let selected = self.view == target
            || (target == AppView::PendingChallenges
                && matches!(self.view, AppView::ReviewChallenge(_)));
        if ui.selectable_label(selected, label).clicked() {
            self.navigate(target);
        }
    }

    fn show_workspace(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            self.show_header(ui);
        });
        egui::SidePanel::left("app_sidebar")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                self.show_sidebar(ui);
            });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            self.show_form_feedback(ui);
            egui::ScrollArea::vertical().show(ui, |ui| match self.view {
                AppView::Dashboard => self.show_dashboard(ui),
                AppView::ActiveChallenges => {
                    self.show_challenge_list(ui, ChallengeStatus::Active)
                }
                AppView::PendingChallenges => {
                    self.show_challenge_list(ui, ChallengeStatus::Pending)
                }
                AppView::AddChallenge => self.show_add_challenge(ui),
                AppView::ReviewChallenge(challenge_id) => {
                    self.show_review_challenge(ui, challenge_id)
                }
                AppView::PostManagement => self.show_post_management(ui),
                AppView::Products => self.show_products(ui),
                AppView::Orders => self.show_orders(ui),
                AppView::Settings => self.show_settings(ui),
                AppView::Login | AppView::Register => {}
            });
        });
        self.show_delete_confirm(ctx);
    }

    fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.heading("Dashboard");
        ui.add_space(8.0);
        ui.horizontal_wrapped(|ui| {
            stat_card(ui, "Pending challenges", self.pending_challenges.len());
            stat_card(ui, "Active challenges", self.active_challenges.len());
            stat_card(ui, "Posts", self.posts.len());
            stat_card(ui, "Open orders", self.orders.len());
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Quick actions").strong());
        ui.horizontal(|ui| {
            if ui.button("Add a challenge").clicked() {
                self.navigate(AppView::AddChallenge);
            }
            if ui.button("Review pending challenges").clicked() {
                self.navigate(AppView::PendingChallenges);
            }
        });
    }

    fn show_challenge_list(&mut self, ui: &mut egui::Ui, status: ChallengeStatus) {
        ui.heading(format!("{} Challenges", status.label()));
        ui.add_space(8.0);

        ui.columns(5, |cols| {
            cols[0].weak("ID");
            cols[1].weak("Challenge");
            cols[2].weak("Points");
            cols[3].weak("Added by");
            cols[4].weak("");
        });
        ui.add_space(4.0);

        let rows = match status {
            ChallengeStatus::Pending => &self.pending_challenges,
            ChallengeStatus::Active => &self.active_challenges,
        };
        let mut open_review = None;
        for challenge in rows {
            egui::Frame::group(ui.style())
                .rounding(8.0)
                .show(ui, |ui| {
                    ui.columns(5, |cols| {
                        cols[0].label(format!("{:02}", challenge.challenge_id.0));
                        cols[1].label(&challenge.name);
                        cols[2].label(challenge.points.to_string());
                        cols[3].label(&challenge.added_by);
                        cols[4].with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui.button("Review").clicked() {
                                    open_review = Some(challenge.challenge_id);
                                }
                            },
                        );
                    });
                });
            ui.add_space(4.0);
        }
        if let Some(challenge_id) = open_review {
            self.navigate(AppView::ReviewChallenge(challenge_id));
        }
    }

    fn pick_challenge_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
            .pick_file()
        else {
            return;
        };
        if !media::is_supported_image(&path) {
            self.status = format!("{} is not a supported image", path.display());
            return;
        }
        match media::file_to_data_url(&path) {
            Ok(data_url) => {
                self.add_form.fields.photo_url = data_url;
            }
            Err(err) => {
                self.status = format!("Failed to load image: {err:#}");
            }
        }
    }

    fn ensure_photo_preview(&mut self, ctx: &egui::Context, source: &str) {
        if self.photo_previews.contains_key(source) {
            return;
        }
        let preview = match media::data_url_bytes(source) {
            None => PhotoPreview::RemoteUrl,
            Some(bytes) => match media::decode_preview_image(&bytes) {
                Ok(image) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    let texture = ctx.load_texture(
                        format!("challenge-photo:{}", self.photo_previews.len()),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    PhotoPreview::Image {
                        texture,
                        size: egui::vec2(image.width as f32, image.height as f32),
                    }
                }
                Err(err) => {
                    tracing::warn!("photo preview decode failed: {err:#}");
                    PhotoPreview::DecodeFailed
                }
            },
        };
        self.photo_previews.insert(source.to_string(), preview);
    }

    fn show_photo_preview(&mut self, ui: &mut egui::Ui, source: &str) {
        self.ensure_photo_preview(ui.ctx(), source);
        match self.photo_previews.get(source) {
            Some(PhotoPreview::Image { texture, size }) => {
                let max_width = ui.available_width().min(420.0);
                let scale = (max_width / size.x).min(1.0);
                ui.add(egui::Image::new(texture).fit_to_exact_size(*size * scale));
            }
            Some(PhotoPreview::RemoteUrl) => {
                // Hosted images are the backend's concern; show where the
                // photo lives instead of fetching it.
                ui.weak(source);
            }
            Some(PhotoPreview::DecodeFailed) => {
                ui.weak("Image preview unavailable");
            }
            None => {}
        }
    }

    fn show_add_challenge(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add New Challenge");
        ui.separator();
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Upload an Image *").strong());
        egui::Frame::group(ui.style())
            .rounding(8.0)
            .inner_margin(egui::Margin::symmetric(14, 14))
            .show(ui, |ui| {
                if self.add_form.fields.photo_url.is_empty() {
                    ui.weak("Click to upload image");
                } else {
                    let source = self.add_form.fields.photo_url.clone();
                    self.show_photo_preview(ui, &source);
                }
                if ui.button("Choose image...").clicked() {
                    self.pick_challenge_image();
                }
            });
        ui.add_space(6.0);

        Self::labeled_text_field(
            ui,
            "Challenge Name *",
            "Enter challenge name",
            &mut self.add_form.fields.name,
            false,
        );
        Self::labeled_text_field(
            ui,
            "Number of Points *",
            "Enter points",
            &mut self.add_form.fields.points,
            false,
        );
        ui.label(egui::RichText::new("Challenge Description *").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.add_form.fields.description)
                .hint_text("Enter challenge description")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                let back = self.previous_view;
                self.navigate(back);
            }
            let can_submit =
                !self.add_form.loading && self.add_form.fields.required_complete();
            let submit_label = if self.add_form.loading {
                "Adding..."
            } else {
                "Add Challenge"
            };
            if ui
                .add_enabled(can_submit, egui::Button::new(submit_label))
                .clicked()
            {
                let request = self.add_form.fields.create_request();
                self.add_form.begin_submit();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::CreateChallenge { request },
                    &mut self.status,
                );
            }
        });
    }

    fn show_review_challenge(&mut self, ui: &mut egui::Ui, challenge_id: ChallengeId) {
        ui.heading("Review Challenge");
        ui.separator();
        ui.add_space(6.0);

        match self.review_form.load_state() {
            LoadState::Loading => {
                ui.weak("Loading challenge...");
                ui.add_space(6.0);
            }
            LoadState::LoadError => {
                ui.weak("Challenge data could not be loaded.");
                ui.add_space(6.0);
            }
            _ => {}
        }

        ui.label(egui::RichText::new("Challenge Image *").strong());
        egui::Frame::group(ui.style())
            .rounding(8.0)
            .inner_margin(egui::Margin::symmetric(14, 14))
            .show(ui, |ui| {
                if self.review_form.fields.photo_url.is_empty() {
                    ui.weak("Image preview will appear here");
                } else {
                    let source = self.review_form.fields.photo_url.clone();
                    self.show_photo_preview(ui, &source);
                }
            });
        if !self.review_form.fields.added_by.is_empty() {
            ui.small(format!("Submitted by {}", self.review_form.fields.added_by));
        }
        ui.add_space(6.0);

        Self::labeled_text_field(
            ui,
            "Challenge Name *",
            "Enter challenge name",
            &mut self.review_form.fields.name,
            false,
        );
        Self::labeled_text_field(
            ui,
            "Number of Points *",
            "Enter points",
            &mut self.review_form.fields.points,
            false,
        );
        ui.label(egui::RichText::new("Challenge Description *").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.review_form.fields.description)
                .hint_text("Enter challenge description")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let delete_label = if self.review_form.loading {
                "Deleting..."
            } else {
                "Delete"
            };
            if ui
                .add_enabled(!self.review_form.loading, egui::Button::new(delete_label))
                .clicked()
            {
                self.review_form.request_delete();
            }

            let approve_label = if self.review_form.loading {
                "Approving..."
            } else {
                "Approve"
            };
            if ui
                .add_enabled(!self.review_form.loading, egui::Button::new(approve_label))
                .clicked()
            {
                let request = self.review_form.fields.approve_request();
                self.review_form.begin_submit();
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::ApproveChallenge {
                        challenge_id,
                        request,
                    },
                    &mut self.status,
                );
            }
        });
    }

    fn show_delete_confirm(&mut self, ctx: &egui::Context) {
        let AppView::ReviewChallenge(challenge_id) = self.view else {
            return;
        };
        if !self.review_form.confirming_delete() {
            return;
        }

        egui::Window::new("Confirm deletion")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this challenge?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.review_form.decline_delete();
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new("Delete").color(egui::Color32::WHITE),
                    )
                    .fill(ERROR_FILL);
                    if ui.add(delete).clicked() && self.review_form.confirm_delete() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::DeleteChallenge { challenge_id },
                            &mut self.status,
                        );
                    }
                });
            });
    }

    fn show_post_management(&mut self, ui: &mut egui::Ui) {
        ui.heading("Post Management");
        ui.add_space(8.0);

        ui.columns(6, |cols| {
            cols[0].weak("");
            cols[1].weak("Post ID");
            cols[2].weak("Content");
            cols[3].weak("Username");
            cols[4].weak("Likes");
            cols[5].weak("Publish Date");
        });
        ui.add_space(4.0);

        for post in &self.posts {
            egui::Frame::group(ui.style())
                .rounding(8.0)
                .show(ui, |ui| {
                    ui.columns(6, |cols| {
                        cols[0].label(format!("{:02}", post.post_id.0));
                        cols[1].label(&post.post_ref);
                        cols[2].label(&post.content);
                        cols[3].label(&post.username);
                        cols[4].label(post.likes.to_string());
                        cols[5].label(&post.publish_date);
                    });
                });
            ui.add_space(4.0);
        }
    }

    fn show_products(&mut self, ui: &mut egui::Ui) {
        ui.heading("Products");
        ui.add_space(8.0);

        ui.columns(4, |cols| {
            cols[0].weak("ID");
            cols[1].weak("Product");
            cols[2].weak("Points");
            cols[3].weak("Stock");
        });
        ui.add_space(4.0);

        for product in &self.products {
            egui::Frame::group(ui.style())
                .rounding(8.0)
                .show(ui, |ui| {
                    ui.columns(4, |cols| {
                        cols[0].label(format!("{:02}", product.product_id.0));
                        cols[1].label(&product.name);
                        cols[2].label(product.points_price.to_string());
                        cols[3].label(product.stock.to_string());
                    });
                });
            ui.add_space(4.0);
        }
    }

    fn show_orders(&mut self, ui: &mut egui::Ui) {
        ui.heading("Orders");
        ui.add_space(8.0);

        ui.columns(5, |cols| {
            cols[0].weak("Order");
            cols[1].weak("Product");
            cols[2].weak("Username");
            cols[3].weak("Status");
            cols[4].weak("Placed");
        });
        ui.add_space(4.0);

        for order in &self.orders {
            egui::Frame::group(ui.style())
                .rounding(8.0)
                .show(ui, |ui| {
                    ui.columns(5, |cols| {
                        cols[0].label(format!("#{:04}", order.order_id.0));
                        cols[1].label(&order.product);
                        cols[2].label(&order.username);
                        cols[3].label(&order.status);
                        cols[4].label(&order.placed_at);
                    });
                });
            ui.add_space(4.0);
        }
    }

    fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.separator();
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Server").strong());
        ui.horizontal(|ui| {
            ui.monospace(&self.server_url);
            ui.small(format!("({})", server_environment_label(&self.server_url)));
        });
        ui.small("Set CHALLENGE_ADMIN_SERVER_URL or pass --server-url to change the backend.");

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(6.0);
        if ui.button("Sign out").clicked() {
            self.sign_out();
        }
    }
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: usize) {
    egui::Frame::group(ui.style())
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(value.to_string()).heading());
                ui.weak(label);
            });
        });
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);

        if let Some(target) = self.add_form.tick(now) {
            self.navigate(target);
        }
        if let Some(target) = self.review_form.tick(now) {
            self.navigate(target);
        }

        let guarded = guarded_view(self.view, self.auth_session_established);
        if guarded != self.view {
            self.navigate(guarded);
        }

        match self.view {
            AppView::Login => self.show_login_screen(ctx),
            AppView::Register => self.show_register_screen(ctx),
            _ => self.show_workspace(ctx),
        }

        // Timers (message auto-clear, delayed redirects) must fire without
        // user input.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn seeded_challenges(status: ChallengeStatus) -> Vec<ChallengeSummary> {
    let rows: &[(i64, &str, i64, &str)] = match status {
        ChallengeStatus::Pending => &[
            (101, "Run 5k", 10, "@melissa"),
            (102, "No sugar for a week", 25, "@jordan"),
            (103, "Morning stretch routine", 5, "@sam"),
        ],
        ChallengeStatus::Active => &[
            (11, "10k steps a day", 15, "@melissa"),
            (12, "Drink 2L of water", 5, "@alex"),
            (13, "Read 20 pages", 10, "@jordan"),
            (14, "Meatless Monday", 10, "@sam"),
        ],
    };
    rows.iter()
        .map(|(id, name, points, added_by)| ChallengeSummary {
            challenge_id: ChallengeId(*id),
            name: (*name).to_string(),
            points: *points,
            status,
            added_by: (*added_by).to_string(),
        })
        .collect()
}

fn seeded_posts() -> Vec<PostSummary> {
    (1..=5)
        .map(|n| PostSummary {
            post_id: PostId(n),
            post_ref: format!("#PostID{n:03}"),
            content: "Lorem ipsum dolor sit amet, consectetur adipiscing elit...".to_string(),
            username: "@melissa".to_string(),
            likes: 23,
            publish_date: "12/23/2003".to_string(),
        })
        .collect()
}

fn seeded_products() -> Vec<ProductSummary> {
    [
        (1, "Water bottle", 120, 42),
        (2, "Gym towel", 80, 17),
        (3, "Sticker pack", 30, 250),
        (4, "Hoodie", 400, 8),
    ]
    .into_iter()
    .map(|(id, name, points_price, stock)| ProductSummary {
        product_id: ProductId(id),
        name: name.to_string(),
        points_price,
        stock,
    })
    .collect()
}

fn seeded_orders() -> Vec<OrderSummary> {
    [
        (2001, "Water bottle", "@melissa", "Shipped", "05/12/2024"),
        (2002, "Hoodie", "@jordan", "Pending", "05/14/2024"),
        (2003, "Sticker pack", "@alex", "Delivered", "05/02/2024"),
    ]
    .into_iter()
    .map(|(id, product, username, status, placed_at)| OrderSummary {
        order_id: OrderId(id),
        product: product.to_string(),
        username: username.to_string(),
        status: status.to_string(),
        placed_at: placed_at.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiError;

    #[test]
    fn unauthenticated_users_only_reach_the_auth_screens() {
        assert_eq!(
            guarded_view(AppView::Dashboard, false),
            AppView::Login
        );
        assert_eq!(
            guarded_view(AppView::ReviewChallenge(ChallengeId(3)), false),
            AppView::Login
        );
        assert_eq!(guarded_view(AppView::Register, false), AppView::Register);
        assert_eq!(guarded_view(AppView::Login, false), AppView::Login);
    }

    #[test]
    fn authenticated_users_skip_the_auth_screens() {
        assert_eq!(guarded_view(AppView::Login, true), AppView::Dashboard);
        assert_eq!(guarded_view(AppView::Register, true), AppView::Dashboard);
        assert_eq!(guarded_view(AppView::Orders, true), AppView::Orders);
    }

    #[test]
    fn classifies_backend_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(!err.requires_reauth());
    }

    #[test]
    fn login_rejections_do_not_force_reauth_loops() {
        let err = UiError::from_message(UiErrorContext::Login, "invalid credentials");
        assert_eq!(err.category(), UiErrorCategory::Auth);
        assert!(!err.requires_reauth());

        let expired = UiError::from_message(UiErrorContext::General, "session expired");
        assert!(expired.requires_reauth());
    }

    #[test]
    fn labels_server_environments_by_host() {
        assert_eq!(server_environment_label("http://localhost:8080"), "Local");
        assert_eq!(
            server_environment_label("https://staging.challenges.example"),
            "Staging"
        );
        assert_eq!(
            server_environment_label("https://api.challenges.example"),
            "Production"
        );
    }
}
