//! Built-in Spanish and English message tables.

use super::{Locale, MessageCatalog, MessageKey};

/// `(key, es, en)` rows.
const ENTRIES: &[(&str, &str, &str)] = &[
    (
        "menu.errors.invalid_token",
        "El enlace del menú no es válido.",
        "This menu link is not valid.",
    ),
    (
        "menu.errors.not_guest",
        "Este QR no es para comensales.",
        "This QR code is not meant for guests.",
    ),
    (
        "menu.errors.token_expired",
        "Este enlace ha caducado.",
        "This link has expired.",
    ),
    (
        "menu.errors.not_found",
        "No encontramos este menú.",
        "We could not find this menu.",
    ),
    (
        "menu.errors.rate_limited",
        "Demasiadas solicitudes. Intenta en un momento.",
        "Too many requests. Try again in a moment.",
    ),
    (
        "menu.errors.server_error",
        "Error en el servidor. Intenta más tarde.",
        "Server error. Please try again later.",
    ),
    (
        "menu.errors.network_error",
        "No hay conexión. Revisa tu red e intenta de nuevo.",
        "No connection. Check your network and try again.",
    ),
    (
        "menu.errors.timeout",
        "La solicitud tardó demasiado. Intenta de nuevo.",
        "The request took too long. Try again.",
    ),
    (
        "menu.errors.invalid_qr",
        "QR no es para comensales o es inválido.",
        "This QR code is invalid or not meant for guests.",
    ),
    (
        "menu.errors.generic",
        "Algo salió mal. Intenta de nuevo.",
        "Something went wrong. Try again.",
    ),
    (
        "invite.errors.invalid_qr",
        "El enlace de invitación no es válido.",
        "This invitation link is not valid.",
    ),
    (
        "invite.errors.invalid_token",
        "Código de invitación no válido.",
        "Invalid invitation code.",
    ),
    (
        "invite.errors.token_expired",
        "El código de invitación ha expirado.",
        "This invitation code has expired.",
    ),
    (
        "invite.errors.token_used",
        "Este código ya fue utilizado. Pide al gerente u owner que genere uno nuevo.",
        "This code has already been used. Ask the manager/owner to generate a new one.",
    ),
    (
        "invite.errors.token_max_uses_reached",
        "Este código ya alcanzó su límite de uso. Pide al gerente u owner que genere uno nuevo.",
        "This code has reached its usage limit. Ask the manager/owner to generate a new one.",
    ),
    (
        "invite.errors.branch_not_found",
        "Sucursal no encontrada.",
        "Branch not found.",
    ),
    (
        "invite.errors.not_authenticated",
        "Debes iniciar sesión para enviar la solicitud.",
        "You must sign in to send the request.",
    ),
    (
        "invite.errors.already_registered",
        "Este correo ya tiene cuenta. Cuando un administrador apruebe tu solicitud, usa la app para entrar.",
        "This email already has an account. Once an administrator approves your request, use the app to sign in.",
    ),
    (
        "invite.errors.email_mismatch",
        "Los correos no coinciden.",
        "Emails do not match.",
    ),
    (
        "invite.errors.too_many_pending",
        "Hay demasiadas solicitudes pendientes para esta sucursal. Espera a que se aprueben o rechacen.",
        "Too many pending requests for this branch. Wait for some to be approved or rejected.",
    ),
    (
        "invite.errors.generic",
        "Ha ocurrido un error. Inténtalo de nuevo.",
        "Something went wrong. Please try again.",
    ),
    (
        "invite.account_pending",
        "Confirma tu correo y vuelve a abrir este enlace del QR para enviar la solicitud.",
        "Confirm your email and open this QR link again to send the request.",
    ),
    (
        "invite.request_submitted",
        "Tu cuenta fue creada. Cuando el owner o gerente apruebe tu solicitud, inicia sesión desde la app.",
        "Your account was created. Once the owner or manager approves your request, sign in from the app.",
    ),
];

/// Message tables compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl MessageCatalog for BuiltinCatalog {
    fn lookup(&self, locale: Locale, key: MessageKey) -> Option<&str> {
        ENTRIES
            .iter()
            .find(|(candidate, _, _)| *candidate == key.as_str())
            .map(|(_, es, en)| match locale {
                Locale::Es => *es,
                Locale::En => *en,
            })
    }
}
