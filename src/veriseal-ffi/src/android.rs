//! Android JNI bindings.
//!
//! Exposes the gated operations to managed code and implements the package
//! registry oracle over PackageManager: resolve the caller's `Context`,
//! fetch its `PackageInfo` with `GET_SIGNATURES`, and fingerprint the first
//! signing certificate via its `hashCode()`. Every distinct JNI failure
//! site maps to its own `LookupError` variant; the wire code collapses them
//! all to `-3`.

use std::ptr;
use std::sync::OnceLock;

use jni::objects::{JClass, JObject, JObjectArray, JString, JValue};
use jni::sys::{jint, jstring};
use jni::JNIEnv;

use veriseal_core::{LookupError, PackageIdentity, PackageRegistry, SealEngine};

/// `PackageManager.GET_SIGNATURES`.
const GET_SIGNATURES: i32 = 64;

static ENGINE: OnceLock<SealEngine> = OnceLock::new();

/// The process-wide engine; first use wires up logging and the tripwire.
fn engine() -> &'static SealEngine {
    ENGINE.get_or_init(|| {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag("VeriSeal"),
        );
        crate::constructor::arm_once();
        SealEngine::new()
    })
}

/// Identity resolved once per native call.
///
/// The engine consults the registry exactly once per operation, so eager
/// resolution here still yields a fresh verdict on every call.
struct ResolvedRegistry(Result<PackageIdentity, LookupError>);

impl PackageRegistry for ResolvedRegistry {
    fn resolve(&self) -> Result<PackageIdentity, LookupError> {
        self.0.clone()
    }
}

/// Clear any pending exception and tag the failure with its site.
fn fail(env: &mut JNIEnv, error: LookupError) -> LookupError {
    let _ = env.exception_clear();
    error
}

/// Walk PackageManager for the caller's declared identity.
fn resolve_caller(env: &mut JNIEnv, context: &JObject) -> Result<PackageIdentity, LookupError> {
    if context.is_null() {
        return Err(LookupError::RegistryUnavailable {
            reason: "null context".into(),
        });
    }

    let package_manager = env
        .call_method(
            context,
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(|_| {
            fail(
                &mut *env,
                LookupError::MethodUnresolved {
                    method: "getPackageManager",
                },
            )
        })?;

    let package_name_obj = env
        .call_method(context, "getPackageName", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|_| {
            fail(
                &mut *env,
                LookupError::MethodUnresolved {
                    method: "getPackageName",
                },
            )
        })?;
    let package_name_jstr = JString::from(package_name_obj);
    let package_name: String = match env.get_string(&package_name_jstr) {
        Ok(s) => s.into(),
        Err(_) => {
            return Err(fail(
                env,
                LookupError::FieldAbsent {
                    field: "packageName",
                },
            ))
        }
    };

    let package_info = env
        .call_method(
            &package_manager,
            "getPackageInfo",
            "(Ljava/lang/String;I)Landroid/content/pm/PackageInfo;",
            &[
                JValue::Object(&package_name_jstr),
                JValue::Int(GET_SIGNATURES),
            ],
        )
        .and_then(|v| v.l())
        .map_err(|_| {
            fail(
                &mut *env,
                LookupError::MethodUnresolved {
                    method: "getPackageInfo",
                },
            )
        })?;

    let signatures = env
        .get_field(
            &package_info,
            "signatures",
            "[Landroid/content/pm/Signature;",
        )
        .and_then(|v| v.l())
        .map_err(|_| {
            fail(
                &mut *env,
                LookupError::FieldAbsent {
                    field: "signatures",
                },
            )
        })?;
    if signatures.is_null() {
        return Err(LookupError::FieldAbsent {
            field: "signatures",
        });
    }

    let signatures = JObjectArray::from(signatures);
    let count = env
        .get_array_length(&signatures)
        .map_err(|_| {
            fail(
                &mut *env,
                LookupError::FieldAbsent {
                    field: "signatures",
                },
            )
        })?;
    if count == 0 {
        return Err(LookupError::NoCertificates);
    }

    let mut certificate_hashes = Vec::with_capacity(count as usize);
    for i in 0..count {
        let signature = env
            .get_object_array_element(&signatures, i)
            .map_err(|_| fail(&mut *env, LookupError::NoCertificates))?;
        let hash = env
            .call_method(&signature, "hashCode", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|_| {
                fail(
                    &mut *env,
                    LookupError::MethodUnresolved { method: "hashCode" },
                )
            })?;
        certificate_hashes.push(hash);
    }

    Ok(PackageIdentity {
        package_name,
        certificate_hashes,
    })
}

/// Read a Java string argument, clearing the exception on failure.
fn read_string(env: &mut JNIEnv, input: &JString) -> Option<String> {
    match env.get_string(input) {
        Ok(s) => Some(s.into()),
        Err(_) => {
            let _ = env.exception_clear();
            None
        }
    }
}

/// Render the result of a gated string operation back to managed code.
///
/// Failures on the allowed path collapse to the sentinel; only a broken
/// JNI environment yields null.
fn to_jstring(env: &mut JNIEnv, output: String) -> jstring {
    match env.new_string(output) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            let _ = env.exception_clear();
            ptr::null_mut()
        }
    }
}

/// `int check(Object context)` — raw signature check code.
#[no_mangle]
pub extern "system" fn Java_io_veriseal_VeriSeal_check<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jint {
    let engine = engine();
    let registry = ResolvedRegistry(resolve_caller(&mut env, &context));
    engine.check(&registry)
}

/// `String encode(Object context, String plaintext)` — gated AES encrypt.
#[no_mangle]
pub extern "system" fn Java_io_veriseal_VeriSeal_encode<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    plaintext: JString<'local>,
) -> jstring {
    let engine = engine();
    let Some(plaintext) = read_string(&mut env, &plaintext) else {
        return ptr::null_mut();
    };
    let registry = ResolvedRegistry(resolve_caller(&mut env, &context));
    let output = engine
        .encode(&registry, &plaintext)
        .unwrap_or_else(|err| {
            log::warn!("encode failed: {err}");
            engine.config().sentinel.clone()
        });
    to_jstring(&mut env, output)
}

/// `String decode(Object context, String ciphertext)` — gated AES decrypt.
#[no_mangle]
pub extern "system" fn Java_io_veriseal_VeriSeal_decode<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    ciphertext: JString<'local>,
) -> jstring {
    let engine = engine();
    let Some(ciphertext) = read_string(&mut env, &ciphertext) else {
        return ptr::null_mut();
    };
    let registry = ResolvedRegistry(resolve_caller(&mut env, &context));
    let output = engine
        .decode(&registry, &ciphertext)
        .unwrap_or_else(|err| {
            log::warn!("decode failed: {err}");
            engine.config().sentinel.clone()
        });
    to_jstring(&mut env, output)
}

/// `String sign(Object context, String payload)` — gated keyed digest.
#[no_mangle]
pub extern "system" fn Java_io_veriseal_VeriSeal_sign<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    payload: JString<'local>,
) -> jstring {
    let engine = engine();
    let Some(payload) = read_string(&mut env, &payload) else {
        return ptr::null_mut();
    };
    let registry = ResolvedRegistry(resolve_caller(&mut env, &context));
    let output = engine
        .sign(&registry, &payload)
        .unwrap_or_else(|err| {
            log::warn!("sign failed: {err}");
            engine.config().sentinel.clone()
        });
    to_jstring(&mut env, output)
}
